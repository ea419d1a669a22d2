use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::sentiment::Sentiment;
use crate::source::{Comment, Post};

pub const DEFAULT_DATASET_FILE: &str = "final_hinglish_sentiment_dataset.csv";

/// Column order of the persisted dataset
pub const DATASET_COLUMNS: [&str; 7] = [
    "comment",
    "sentiment",
    "comment_date",
    "comment_year",
    "comment_score",
    "post_title",
    "post_date",
];

// ============================================================================
// TIMESTAMPS
// ============================================================================

/// Epoch seconds (fractional allowed) to a UTC timestamp
pub fn epoch_to_utc(epoch_seconds: f64) -> Result<DateTime<Utc>> {
    if !epoch_seconds.is_finite() {
        return Err(anyhow!("Invalid timestamp: {}", epoch_seconds));
    }
    DateTime::from_timestamp(epoch_seconds.trunc() as i64, 0)
        .ok_or_else(|| anyhow!("Timestamp out of range: {}", epoch_seconds))
}

// ============================================================================
// RECORDS
// ============================================================================

/// Post fields attached to every record harvested from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostContext {
    pub post_id: String,
    pub post_title: String,
    pub post_date: String,
    pub post_year: i32,
    pub post_score: i64,
}

impl PostContext {
    pub fn from_post(post: &Post) -> Result<Self> {
        let created = epoch_to_utc(post.created_utc)
            .with_context(|| format!("Post {} has an unusable creation time", post.id))?;

        Ok(PostContext {
            post_id: post.id.clone(),
            post_title: post.title.clone(),
            post_date: created.format("%Y-%m-%d").to_string(),
            post_year: created.year(),
            post_score: post.score,
        })
    }
}

/// A comment that passed the Hinglish gate, with its label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub post: PostContext,

    pub comment: String,
    pub comment_date: String,
    pub comment_year: i32,
    pub comment_score: i64,
    pub comment_author: String,
    pub sentiment: Sentiment,
}

impl ClassifiedRecord {
    pub fn new(post: &PostContext, comment: &Comment, sentiment: Sentiment) -> Result<Self> {
        let created = epoch_to_utc(comment.created_utc)
            .with_context(|| format!("Comment {} has an unusable creation time", comment.id))?;

        Ok(ClassifiedRecord {
            post: post.clone(),
            comment: comment.body.clone(),
            comment_date: created.format("%Y-%m-%d").to_string(),
            comment_year: created.year(),
            comment_score: comment.score,
            comment_author: comment.author_or_deleted().to_string(),
            sentiment,
        })
    }
}

// ============================================================================
// DATASET ROW (fixed projection)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRow {
    pub comment: String,
    pub sentiment: Sentiment,
    pub comment_date: String,
    pub comment_year: i32,
    pub comment_score: i64,
    pub post_title: String,
    pub post_date: String,
}

impl From<&ClassifiedRecord> for DatasetRow {
    fn from(record: &ClassifiedRecord) -> Self {
        DatasetRow {
            comment: record.comment.clone(),
            sentiment: record.sentiment,
            comment_date: record.comment_date.clone(),
            comment_year: record.comment_year,
            comment_score: record.comment_score,
            post_title: record.post.post_title.clone(),
            post_date: record.post.post_date.clone(),
        }
    }
}

pub fn to_rows(records: &[ClassifiedRecord]) -> Vec<DatasetRow> {
    records.iter().map(DatasetRow::from).collect()
}

// ============================================================================
// CSV PERSISTENCE
// ============================================================================

/// Write the dataset; returns the number of rows written
pub fn write_dataset(path: &Path, records: &[ClassifiedRecord]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create dataset file: {}", path.display()))?;

    // Header is written explicitly so an empty dataset still has columns
    wtr.write_record(DATASET_COLUMNS)?;
    let mut written = 0;
    for row in to_rows(records) {
        wtr.write_record(&[
            row.comment,
            row.sentiment.to_string(),
            row.comment_date,
            row.comment_year.to_string(),
            row.comment_score.to_string(),
            row.post_title,
            row.post_date,
        ])?;
        written += 1;
    }
    wtr.flush().context("Failed to flush dataset file")?;

    log::info!("Dataset saved to {} ({} rows)", path.display(), written);
    Ok(written)
}

pub fn load_dataset(path: &Path) -> Result<Vec<DatasetRow>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open dataset file: {}", path.display()))?;

    let mut rows = Vec::new();
    for (line, result) in rdr.deserialize().enumerate() {
        let row: DatasetRow = result
            .with_context(|| format!("Failed to deserialize dataset row {}", line + 2))?;
        rows.push(row);
    }

    Ok(rows)
}

// ============================================================================
// TESTS
// ============================================================================
