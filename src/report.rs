// 📊 Reports - dataset summary and raw-dump statistics

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};

use crate::dataset::DatasetRow;
use crate::raw_dump::RawCommentRow;
use crate::sentiment::Sentiment;

/// Sample comments kept per sentiment label
pub const SAMPLES_PER_LABEL: usize = 2;

// ============================================================================
// DATASET SUMMARY
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LabelCount {
    pub sentiment: Sentiment,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub total: usize,

    /// Bullish, bearish, neutral; labels with no rows are omitted
    pub by_sentiment: Vec<LabelCount>,

    /// Ascending by year
    pub by_year: Vec<YearCount>,

    pub samples: Vec<(Sentiment, Vec<DatasetRow>)>,
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

impl DatasetSummary {
    pub fn from_rows(rows: &[DatasetRow]) -> Self {
        let total = rows.len();

        let by_sentiment = Sentiment::ALL
            .iter()
            .map(|&sentiment| {
                let count = rows.iter().filter(|r| r.sentiment == sentiment).count();
                LabelCount {
                    sentiment,
                    count,
                    percentage: percentage(count, total),
                }
            })
            .filter(|c| c.count > 0)
            .collect();

        let mut years: BTreeMap<i32, usize> = BTreeMap::new();
        for row in rows {
            *years.entry(row.comment_year).or_insert(0) += 1;
        }
        let by_year = years
            .into_iter()
            .map(|(year, count)| YearCount {
                year,
                count,
                percentage: percentage(count, total),
            })
            .collect();

        let samples = Sentiment::ALL
            .iter()
            .map(|&sentiment| {
                let picked: Vec<DatasetRow> = rows
                    .iter()
                    .filter(|r| r.sentiment == sentiment)
                    .take(SAMPLES_PER_LABEL)
                    .cloned()
                    .collect();
                (sentiment, picked)
            })
            .filter(|(_, picked)| !picked.is_empty())
            .collect();

        DatasetSummary {
            total,
            by_sentiment,
            by_year,
            samples,
        }
    }
}

// ============================================================================
// RAW DUMP STATISTICS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RawDumpStats {
    pub total_comments: usize,
    pub unique_posts: usize,
    pub unique_authors: usize,
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
    pub average_comment_score: f64,
    pub total_comment_score: i64,
    pub comments_per_post: f64,
}

impl RawDumpStats {
    /// `None` when there is nothing to analyze
    pub fn from_rows(rows: &[RawCommentRow]) -> Option<Self> {
        let earliest = rows.iter().map(|r| r.comment_created_utc).min()?;
        let latest = rows.iter().map(|r| r.comment_created_utc).max()?;

        let unique_posts = rows.iter().map(|r| r.post_id.as_str()).collect::<HashSet<_>>().len();
        let unique_authors = rows
            .iter()
            .map(|r| r.comment_author.as_str())
            .collect::<HashSet<_>>()
            .len();
        let total_comment_score: i64 = rows.iter().map(|r| r.comment_score).sum();

        Some(RawDumpStats {
            total_comments: rows.len(),
            unique_posts,
            unique_authors,
            earliest,
            latest,
            average_comment_score: total_comment_score as f64 / rows.len() as f64,
            total_comment_score,
            comments_per_post: rows.len() as f64 / unique_posts as f64,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
