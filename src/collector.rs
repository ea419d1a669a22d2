// 📥 Collection Orchestrator - multi-pass harvest with per-item fault tolerance
//
// Passes run sequentially. A failed listing skips its pass, a failed post or
// comment skips that item; both are recorded in the report instead of being
// swallowed. Records are deduplicated by comment text once all passes ran.

use std::thread;
use std::time::Duration;

use crate::dataset::{ClassifiedRecord, PostContext};
use crate::deduplication::dedup_by_comment;
use crate::detector::HinglishDetector;
use crate::errors::ScraperError;
use crate::sentiment::SentimentClassifier;
use crate::source::{ContentProvider, Post, SortMode, TimeWindow};

/// Comments examined per post, after flattening the tree
pub const COMMENTS_PER_POST: usize = 40;

/// Pause after every pass
pub const PASS_PACING: Duration = Duration::from_secs(1);

// ============================================================================
// PASSES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPass {
    pub sort: SortMode,
    pub window: Option<TimeWindow>,
    pub limit: usize,
    pub label: String,
}

impl CollectionPass {
    pub fn new(
        sort: SortMode,
        window: Option<TimeWindow>,
        limit: usize,
        label: &str,
    ) -> Result<Self, ScraperError> {
        if sort.requires_window() && window.is_none() {
            return Err(ScraperError::Configuration(format!(
                "Pass '{}' uses sort '{}' which requires a time window",
                label, sort
            )));
        }

        Ok(CollectionPass {
            sort,
            window,
            limit,
            label: label.to_string(),
        })
    }
}

/// Hot, new, then top over widening windows
pub fn default_passes() -> Vec<CollectionPass> {
    let pass = |sort, window, limit, label: &str| CollectionPass {
        sort,
        window,
        limit,
        label: label.to_string(),
    };

    vec![
        pass(SortMode::Hot, None, 250, "Hot Posts"),
        pass(SortMode::New, None, 200, "Recent Posts"),
        pass(SortMode::Top, Some(TimeWindow::Week), 100, "Top This Week"),
        pass(SortMode::Top, Some(TimeWindow::Month), 150, "Top This Month"),
        pass(SortMode::Top, Some(TimeWindow::Year), 200, "Top This Year"),
        pass(SortMode::Top, Some(TimeWindow::All), 100, "Top All Time"),
    ]
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassStatus {
    Completed { posts: usize, records: usize },
    Skipped { error: ScraperError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutcome {
    pub label: String,
    pub status: PassStatus,
}

impl PassOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self.status, PassStatus::Completed { .. })
    }
}

/// A post or comment that could not be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub pass: String,
    pub error: ScraperError,
}

#[derive(Debug, Clone, Default)]
pub struct CollectionReport {
    /// Deduplicated, in pass order then traversal order
    pub records: Vec<ClassifiedRecord>,
    pub passes: Vec<PassOutcome>,
    pub skipped: Vec<SkippedItem>,
    pub duplicates_removed: usize,
}

impl CollectionReport {
    /// No qualifying comments; a valid outcome, not a failure
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn completed_passes(&self) -> usize {
        self.passes.iter().filter(|p| p.is_completed()).count()
    }

    pub fn skipped_passes(&self) -> usize {
        self.passes.len() - self.completed_passes()
    }
}

// ============================================================================
// COLLECTOR
// ============================================================================

pub struct Collector<P: ContentProvider> {
    provider: P,
    detector: HinglishDetector,
    classifier: SentimentClassifier,
    passes: Vec<CollectionPass>,
    comments_per_post: usize,
    pacing: Duration,
}

impl<P: ContentProvider> Collector<P> {
    pub fn new(provider: P) -> Self {
        Collector {
            provider,
            detector: HinglishDetector::new(),
            classifier: SentimentClassifier::new(),
            passes: default_passes(),
            comments_per_post: COMMENTS_PER_POST,
            pacing: PASS_PACING,
        }
    }

    pub fn with_passes(mut self, passes: Vec<CollectionPass>) -> Self {
        self.passes = passes;
        self
    }

    pub fn with_comments_per_post(mut self, comments_per_post: usize) -> Self {
        self.comments_per_post = comments_per_post;
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Run every pass, then deduplicate by comment text
    pub fn collect(&self) -> CollectionReport {
        let mut records = Vec::new();
        let mut passes = Vec::with_capacity(self.passes.len());
        let mut skipped = Vec::new();

        for pass in &self.passes {
            log::info!("{}...", pass.label);

            let status = self.run_pass(pass, &mut records, &mut skipped);
            match &status {
                PassStatus::Completed { posts, records } => {
                    log::info!("{}: found {} Hinglish comments in {} posts", pass.label, records, posts);
                }
                PassStatus::Skipped { error } => {
                    log::error!("Error in {}: {}", pass.label, error);
                }
            }
            passes.push(PassOutcome {
                label: pass.label.clone(),
                status,
            });

            if !self.pacing.is_zero() {
                thread::sleep(self.pacing);
            }
        }

        let dedup = dedup_by_comment(records);
        log::info!(
            "Total unique Hinglish comments: {} ({} duplicates removed, {} items skipped)",
            dedup.kept.len(),
            dedup.duplicates.len(),
            skipped.len()
        );

        CollectionReport {
            records: dedup.kept,
            passes,
            skipped,
            duplicates_removed: dedup.duplicates.len(),
        }
    }

    fn run_pass(
        &self,
        pass: &CollectionPass,
        records: &mut Vec<ClassifiedRecord>,
        skipped: &mut Vec<SkippedItem>,
    ) -> PassStatus {
        let entries = match self.provider.list_posts(pass.sort, pass.window, pass.limit) {
            Ok(entries) => entries,
            Err(e) => {
                return PassStatus::Skipped {
                    error: ScraperError::pass_fetch(&pass.label, &e),
                }
            }
        };

        let before = records.len();
        let mut post_count = 0;

        for entry in entries.into_iter().take(pass.limit) {
            let post = match entry {
                Ok(post) => post,
                Err(e) => {
                    let error = ScraperError::item_fetch("post listing entry", &e);
                    log::debug!("Skipping post in {}: {}", pass.label, error);
                    skipped.push(SkippedItem {
                        pass: pass.label.clone(),
                        error,
                    });
                    continue;
                }
            };

            post_count += 1;
            if let Err(e) = self.harvest_post(pass, &post, records, skipped) {
                let error = ScraperError::item_fetch(format!("post {}", post.id), &e);
                log::debug!("Skipping post in {}: {}", pass.label, error);
                skipped.push(SkippedItem {
                    pass: pass.label.clone(),
                    error,
                });
            }
        }

        PassStatus::Completed {
            posts: post_count,
            records: records.len() - before,
        }
    }

    /// Post-level failures are returned; comment-level failures are recorded
    fn harvest_post(
        &self,
        pass: &CollectionPass,
        post: &Post,
        records: &mut Vec<ClassifiedRecord>,
        skipped: &mut Vec<SkippedItem>,
    ) -> anyhow::Result<()> {
        let context = PostContext::from_post(post)?;
        let comments = self.provider.list_comments(post)?;

        for entry in comments.into_iter().take(self.comments_per_post) {
            let outcome = entry.and_then(|comment| {
                if comment.is_sentinel() || !self.detector.is_pure_hinglish(&comment.body) {
                    return Ok(None);
                }
                let sentiment = self.classifier.classify(&comment.body, comment.score);
                ClassifiedRecord::new(&context, &comment, sentiment).map(Some)
            });

            match outcome {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => {
                    let error = ScraperError::item_fetch(format!("comment on post {}", post.id), &e);
                    log::debug!("Skipping comment in {}: {}", pass.label, error);
                    skipped.push(SkippedItem {
                        pass: pass.label.clone(),
                        error,
                    });
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Sentiment;
    use crate::source::{Comment, CommentEntry, PostEntry};
    use anyhow::anyhow;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::time::Instant;

    enum MockComment {
        Ok(Comment),
        Broken,
    }

    #[derive(Default)]
    struct MockProvider {
        listings: Vec<(SortMode, Option<TimeWindow>, Vec<Post>)>,
        failing_listings: Vec<(SortMode, Option<TimeWindow>)>,
        /// Listings that start with one entry the source could not decode
        broken_entries: Vec<(SortMode, Option<TimeWindow>)>,
        comments: HashMap<String, Vec<MockComment>>,
        failing_posts: Vec<String>,
        calls: RefCell<Vec<(SortMode, Option<TimeWindow>, usize)>>,
    }

    impl ContentProvider for MockProvider {
        fn list_posts(
            &self,
            sort: SortMode,
            window: Option<TimeWindow>,
            limit: usize,
        ) -> anyhow::Result<Vec<PostEntry>> {
            self.calls.borrow_mut().push((sort, window, limit));
            if self.failing_listings.contains(&(sort, window)) {
                return Err(anyhow!("503 Service Unavailable"));
            }

            let mut entries: Vec<PostEntry> = Vec::new();
            if self.broken_entries.contains(&(sort, window)) {
                entries.push(Err(anyhow!("Undecodable post x1: missing field `title`")));
            }
            if let Some((_, _, posts)) = self.listings.iter().find(|(s, w, _)| *s == sort && *w == window) {
                entries.extend(posts.iter().cloned().map(Ok));
            }
            Ok(entries)
        }

        fn list_comments(&self, post: &Post) -> anyhow::Result<Vec<CommentEntry>> {
            if self.failing_posts.contains(&post.id) {
                return Err(anyhow!("connection reset"));
            }
            Ok(self
                .comments
                .get(&post.id)
                .map(|entries| {
                    entries
                        .iter()
                        .map(|e| match e {
                            MockComment::Ok(c) => Ok(c.clone()),
                            MockComment::Broken => Err(anyhow!("missing field `body`")),
                        })
                        .collect()
                })
                .unwrap_or_default())
        }
    }

    fn create_test_post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            title: format!("Discussion {}", id),
            score: 12,
            created_utc: 1_710_496_800.0,
            num_comments: 5,
            author: Some("op".to_string()),
            url: String::new(),
        }
    }

    fn create_test_comment(id: &str, body: &str, score: i64) -> MockComment {
        MockComment::Ok(Comment {
            id: id.to_string(),
            body: body.to_string(),
            score,
            created_utc: 1_710_500_000.0,
            author: Some("trader".to_string()),
            is_submitter: false,
            permalink: format!("/r/indianstocks/comments/x/{}/", id),
        })
    }

    fn quiet(provider: &MockProvider) -> Collector<&MockProvider> {
        Collector::new(provider).with_pacing(Duration::ZERO)
    }

    const BULLISH_TEXT: &str = "bhai yeh stock bahut accha hai, kharido jaldi";
    const BEARISH_TEXT: &str = "yeh company bekar hai, bech do sab";
    const ENGLISH_TEXT: &str = "Quarterly earnings exceeded analyst expectations by a wide margin";

    #[test]
    fn test_default_passes() {
        let passes = default_passes();
        assert_eq!(passes.len(), 6);
        assert_eq!(passes[0].sort, SortMode::Hot);
        assert_eq!(passes[0].limit, 250);
        assert_eq!(passes[5].window, Some(TimeWindow::All));
        assert!(passes
            .iter()
            .all(|p| !p.sort.requires_window() || p.window.is_some()));
    }

    #[test]
    fn test_top_pass_requires_window() {
        let err = CollectionPass::new(SortMode::Top, None, 10, "Broken").unwrap_err();
        assert!(matches!(err, ScraperError::Configuration(_)));
        assert!(CollectionPass::new(SortMode::New, None, 10, "Fine").is_ok());
    }

    #[test]
    fn test_end_to_end_labels() {
        let mut provider = MockProvider::default();
        provider.listings.push((SortMode::Hot, None, vec![create_test_post("p1")]));
        provider.comments.insert(
            "p1".to_string(),
            vec![
                create_test_comment("c1", BULLISH_TEXT, 8),
                create_test_comment("c2", BEARISH_TEXT, 0),
                create_test_comment("c3", ENGLISH_TEXT, 50),
            ],
        );

        let report = quiet(&provider).collect();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].sentiment, Sentiment::Bullish);
        assert_eq!(report.records[0].post.post_title, "Discussion p1");
        assert_eq!(report.records[1].sentiment, Sentiment::Bearish);
        assert_eq!(report.completed_passes(), 6);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_sentinel_bodies_never_recorded() {
        let mut provider = MockProvider::default();
        provider.listings.push((SortMode::New, None, vec![create_test_post("p1")]));
        provider.comments.insert(
            "p1".to_string(),
            vec![
                create_test_comment("c1", "[deleted]", 100),
                create_test_comment("c2", "[removed]", 100),
                create_test_comment("c3", "deleted", 100),
                create_test_comment("c4", "removed", 100),
            ],
        );

        let report = quiet(&provider).collect();
        assert!(report.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_failed_pass_does_not_stop_later_passes() {
        let mut provider = MockProvider::default();
        provider.failing_listings.push((SortMode::Hot, None));
        provider.listings.push((SortMode::New, None, vec![create_test_post("p2")]));
        provider
            .comments
            .insert("p2".to_string(), vec![create_test_comment("c1", BEARISH_TEXT, 0)]);

        let report = quiet(&provider).collect();

        assert_eq!(report.passes.len(), 6);
        assert!(matches!(
            &report.passes[0].status,
            PassStatus::Skipped { error: ScraperError::PassFetch { pass, .. } } if pass == "Hot Posts"
        ));
        assert_eq!(report.skipped_passes(), 1);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].post.post_id, "p2");
        assert_eq!(provider.calls.borrow().len(), 6);
    }

    #[test]
    fn test_failed_post_is_skipped() {
        let mut provider = MockProvider::default();
        provider.listings.push((
            SortMode::Hot,
            None,
            vec![create_test_post("bad"), create_test_post("good")],
        ));
        provider.failing_posts.push("bad".to_string());
        provider
            .comments
            .insert("good".to_string(), vec![create_test_comment("c1", BULLISH_TEXT, 0)]);

        let report = quiet(&provider).collect();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].pass, "Hot Posts");
        assert!(matches!(
            &report.skipped[0].error,
            ScraperError::ItemFetch { item, .. } if item == "post bad"
        ));
        assert!(matches!(
            report.passes[0].status,
            PassStatus::Completed { posts: 2, records: 1 }
        ));
    }

    #[test]
    fn test_broken_comment_is_skipped() {
        let mut provider = MockProvider::default();
        provider.listings.push((SortMode::Hot, None, vec![create_test_post("p1")]));
        provider.comments.insert(
            "p1".to_string(),
            vec![
                MockComment::Broken,
                create_test_comment("c2", BULLISH_TEXT, 0),
            ],
        );

        let report = quiet(&provider).collect();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn test_only_first_forty_comments_examined() {
        let mut provider = MockProvider::default();
        provider.listings.push((SortMode::Hot, None, vec![create_test_post("p1")]));
        let comments = (0..45)
            .map(|i| create_test_comment(&format!("c{}", i), &format!("bhai yeh hai number {}", i), 0))
            .collect();
        provider.comments.insert("p1".to_string(), comments);

        let report = quiet(&provider).collect();
        assert_eq!(report.records.len(), COMMENTS_PER_POST);
        assert_eq!(report.records.last().unwrap().comment, "bhai yeh hai number 39");
    }

    #[test]
    fn test_duplicates_across_passes_keep_first() {
        let mut provider = MockProvider::default();
        provider.listings.push((SortMode::Hot, None, vec![create_test_post("hot1")]));
        provider.listings.push((
            SortMode::Top,
            Some(TimeWindow::Week),
            vec![create_test_post("week1")],
        ));
        provider
            .comments
            .insert("hot1".to_string(), vec![create_test_comment("c1", BEARISH_TEXT, 0)]);
        provider
            .comments
            .insert("week1".to_string(), vec![create_test_comment("c9", BEARISH_TEXT, -10)]);

        let report = quiet(&provider).collect();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].post.post_id, "hot1");
        assert_eq!(report.duplicates_removed, 1);
    }

    #[test]
    fn test_empty_run_is_not_an_error() {
        let provider = MockProvider::default();
        let report = quiet(&provider).collect();

        assert!(report.is_empty());
        assert_eq!(report.completed_passes(), 6);
        assert_eq!(report.skipped_passes(), 0);
    }

    #[test]
    fn test_pass_limits_reach_provider() {
        let provider = MockProvider::default();
        let passes = vec![
            CollectionPass::new(SortMode::Rising, None, 7, "Rising").unwrap(),
            CollectionPass::new(SortMode::Top, Some(TimeWindow::Day), 3, "Top Today").unwrap(),
        ];
        quiet(&provider).with_passes(passes).collect();

        assert_eq!(
            *provider.calls.borrow(),
            vec![
                (SortMode::Rising, None, 7),
                (SortMode::Top, Some(TimeWindow::Day), 3),
            ]
        );
    }

    #[test]
    fn test_listing_truncated_to_limit() {
        let mut provider = MockProvider::default();
        provider.listings.push((
            SortMode::New,
            None,
            vec![create_test_post("a"), create_test_post("b"), create_test_post("c")],
        ));
        for id in ["a", "b", "c"] {
            provider.comments.insert(
                id.to_string(),
                vec![create_test_comment(id, &format!("bhai {} pe kya hai", id), 0)],
            );
        }

        let passes = vec![CollectionPass::new(SortMode::New, None, 2, "Recent").unwrap()];
        let report = quiet(&provider).with_passes(passes).collect();
        assert_eq!(report.records.len(), 2);
    }

    #[test]
    fn test_undecodable_post_entry_is_skipped() {
        let mut provider = MockProvider::default();
        provider.listings.push((SortMode::Hot, None, vec![create_test_post("p1")]));
        provider.broken_entries.push((SortMode::Hot, None));
        provider
            .comments
            .insert("p1".to_string(), vec![create_test_comment("c1", BULLISH_TEXT, 0)]);

        let report = quiet(&provider).collect();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].pass, "Hot Posts");
        assert!(matches!(
            &report.skipped[0].error,
            ScraperError::ItemFetch { item, reason }
                if item == "post listing entry" && reason.contains("x1")
        ));
        assert!(matches!(
            report.passes[0].status,
            PassStatus::Completed { posts: 1, records: 1 }
        ));
    }

    #[test]
    fn test_pacing_after_every_pass() {
        let mut provider = MockProvider::default();
        provider.failing_listings.push((SortMode::Hot, None));
        let pacing = Duration::from_millis(20);

        let started = Instant::now();
        let report = Collector::new(&provider).with_pacing(pacing).collect();
        let elapsed = started.elapsed();

        assert_eq!(report.passes.len(), 6);
        assert_eq!(report.skipped_passes(), 1);
        assert!(elapsed >= pacing * 6, "elapsed {:?}", elapsed);
    }

    #[test]
    fn test_comment_cap_is_configurable() {
        let mut provider = MockProvider::default();
        provider.listings.push((SortMode::Hot, None, vec![create_test_post("p1")]));
        provider.comments.insert(
            "p1".to_string(),
            vec![
                create_test_comment("c1", BULLISH_TEXT, 0),
                MockComment::Broken,
                create_test_comment("c3", BEARISH_TEXT, 0),
            ],
        );

        let report = quiet(&provider).with_comments_per_post(2).collect();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].comment, BULLISH_TEXT);
        assert_eq!(report.skipped.len(), 1);
    }
}
