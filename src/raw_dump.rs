// 📦 Raw Dump - unfiltered harvest with full post/comment metadata
// No Hinglish gate; every materialized comment of every listed post is kept

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::collector::SkippedItem;
use crate::dataset::epoch_to_utc;
use crate::errors::ScraperError;
use crate::source::{Comment, ContentProvider, Post, SortMode, TimeWindow};

const PERMALINK_HOST: &str = "https://reddit.com";

/// Pause after each post
pub const POST_PACING: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCommentRow {
    pub post_id: String,
    pub post_title: String,
    pub post_score: i64,
    pub post_url: String,
    pub post_created_utc: DateTime<Utc>,
    pub post_num_comments: u64,
    pub post_author: String,
    pub comment_id: String,
    pub comment_body: String,
    pub comment_score: i64,
    pub comment_created_utc: DateTime<Utc>,
    pub comment_author: String,
    pub comment_is_submitter: bool,
    pub comment_permalink: String,
}

impl RawCommentRow {
    fn new(post: &Post, post_created: DateTime<Utc>, comment: &Comment) -> Result<Self> {
        let comment_created = epoch_to_utc(comment.created_utc)
            .with_context(|| format!("Comment {} has an unusable creation time", comment.id))?;

        Ok(RawCommentRow {
            post_id: post.id.clone(),
            post_title: post.title.clone(),
            post_score: post.score,
            post_url: post.url.clone(),
            post_created_utc: post_created,
            post_num_comments: post.num_comments,
            post_author: post.author_or_deleted().to_string(),
            comment_id: comment.id.clone(),
            comment_body: comment.body.clone(),
            comment_score: comment.score,
            comment_created_utc: comment_created,
            comment_author: comment.author_or_deleted().to_string(),
            comment_is_submitter: comment.is_submitter,
            comment_permalink: format!("{}{}", PERMALINK_HOST, comment.permalink),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RawDump {
    pub rows: Vec<RawCommentRow>,
    pub skipped: Vec<SkippedItem>,
}

#[derive(Debug, Clone)]
pub struct RawDumpOptions {
    pub sort: SortMode,
    pub window: Option<TimeWindow>,
    pub max_posts: usize,
    pub comments_per_post: usize,
    pub pacing: Duration,
}

/// Unlike the collector, a failed listing is returned to the caller: the
/// dump has a single pass, so there is nothing to continue with.
pub fn raw_dump<P: ContentProvider>(provider: &P, options: &RawDumpOptions) -> Result<RawDump> {
    let label = format!("raw {}", options.sort);
    log::info!(
        "Starting raw dump ({}, window {:?}, {} posts)",
        options.sort,
        options.window,
        options.max_posts
    );

    let entries = provider
        .list_posts(options.sort, options.window, options.max_posts)
        .map_err(|e| ScraperError::pass_fetch(&label, &e))?;

    let mut dump = RawDump::default();

    for entry in entries.into_iter().take(options.max_posts) {
        let post = match entry {
            Ok(post) => post,
            Err(e) => {
                let error = ScraperError::item_fetch("post listing entry", &e);
                log::warn!("{}", error);
                dump.skipped.push(SkippedItem { pass: label.clone(), error });
                continue;
            }
        };

        if let Err(e) = dump_post(provider, &post, options, &label, &mut dump) {
            let error = ScraperError::item_fetch(format!("post {}", post.id), &e);
            log::warn!("Error processing post {}: {}", post.id, error);
            dump.skipped.push(SkippedItem { pass: label.clone(), error });
        }

        if !options.pacing.is_zero() {
            thread::sleep(options.pacing);
        }
    }

    log::info!(
        "Successfully scraped {} comments ({} items skipped)",
        dump.rows.len(),
        dump.skipped.len()
    );
    Ok(dump)
}

fn dump_post<P: ContentProvider>(
    provider: &P,
    post: &Post,
    options: &RawDumpOptions,
    label: &str,
    dump: &mut RawDump,
) -> Result<()> {
    let post_created = epoch_to_utc(post.created_utc)
        .with_context(|| format!("Post {} has an unusable creation time", post.id))?;

    let comments = provider.list_comments(post)?;
    for entry in comments.into_iter().take(options.comments_per_post) {
        match entry.and_then(|comment| RawCommentRow::new(post, post_created, &comment)) {
            Ok(row) => dump.rows.push(row),
            Err(e) => {
                let error = ScraperError::item_fetch(format!("comment on post {}", post.id), &e);
                log::warn!("{}", error);
                dump.skipped.push(SkippedItem { pass: label.to_string(), error });
            }
        }
    }

    Ok(())
}

pub fn write_raw_dump(path: &Path, rows: &[RawCommentRow]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;

    for row in rows {
        wtr.serialize(row).context("Failed to write raw comment row")?;
    }
    wtr.flush()?;

    log::info!("Data saved to {}", path.display());
    Ok(rows.len())
}

pub fn load_raw_dump(path: &Path) -> Result<Vec<RawCommentRow>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    rdr.deserialize()
        .map(|r| r.context("Failed to deserialize raw comment row"))
        .collect()
}

/// `reddit_comments_{subreddit}_{YYYYmmdd_HHMMSS}.csv`
pub fn default_raw_filename(subreddit: &str, now: DateTime<Utc>) -> String {
    format!("reddit_comments_{}_{}.csv", subreddit, now.format("%Y%m%d_%H%M%S"))
}
