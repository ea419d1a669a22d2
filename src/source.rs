// 🌐 Content Source - abstract paginated post/comment provider
//
// The collector only talks to this trait. `RedditClient` is the real
// implementation; tests use an in-memory one.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// LISTING OPTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    Hot,
    New,
    Top,
    Rising,
}

impl SortMode {
    /// Path segment used by the listing endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Hot => "hot",
            SortMode::New => "new",
            SortMode::Top => "top",
            SortMode::Rising => "rising",
        }
    }

    /// Only `top` listings are scoped by a time window
    pub fn requires_window(&self) -> bool {
        matches!(self, SortMode::Top)
    }
}

impl FromStr for SortMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hot" => Ok(SortMode::Hot),
            "new" => Ok(SortMode::New),
            "top" => Ok(SortMode::Top),
            "rising" => Ok(SortMode::Rising),
            other => Err(anyhow!("Invalid sort mode: {} (expected hot, new, top or rising)", other)),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Hour => "hour",
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
            TimeWindow::All => "all",
        }
    }
}

impl FromStr for TimeWindow {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hour" => Ok(TimeWindow::Hour),
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "year" => Ok(TimeWindow::Year),
            "all" => Ok(TimeWindow::All),
            other => Err(anyhow!("Invalid time window: {}", other)),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ITEMS
// ============================================================================

/// Sentinel used wherever an author is missing
pub const DELETED_AUTHOR: &str = "[deleted]";

/// Comment bodies that are never classified (exact, case-sensitive)
pub const SENTINEL_BODIES: [&str; 4] = ["[deleted]", "[removed]", "deleted", "removed"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub score: i64,

    /// Epoch seconds
    pub created_utc: f64,

    #[serde(default)]
    pub num_comments: u64,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub url: String,
}

impl Post {
    pub fn author_or_deleted(&self) -> &str {
        self.author.as_deref().unwrap_or(DELETED_AUTHOR)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub body: String,
    pub score: i64,

    /// Epoch seconds
    pub created_utc: f64,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub is_submitter: bool,

    /// Site-relative path, e.g. `/r/indianstocks/comments/...`
    #[serde(default)]
    pub permalink: String,
}

impl Comment {
    pub fn author_or_deleted(&self) -> &str {
        self.author.as_deref().unwrap_or(DELETED_AUTHOR)
    }

    /// Deleted or removed placeholder body
    pub fn is_sentinel(&self) -> bool {
        SENTINEL_BODIES.contains(&self.body.as_str())
    }
}

/// One entry of a post listing. Posts the source could not decode stay in
/// the list as `Err` so callers can count them.
pub type PostEntry = Result<Post>;

/// One entry of a flattened comment tree. Entries the source could not
/// decode stay in the list as `Err` so callers can count them.
pub type CommentEntry = Result<Comment>;

// ============================================================================
// PROVIDER TRAIT
// ============================================================================

pub trait ContentProvider {
    /// List up to `limit` posts. `window` is required when `sort` is `Top`.
    fn list_posts(&self, sort: SortMode, window: Option<TimeWindow>, limit: usize) -> Result<Vec<PostEntry>>;

    /// Already-materialized comments of a post, flattened in traversal
    /// order. "Load more" placeholders are never expanded.
    fn list_comments(&self, post: &Post) -> Result<Vec<CommentEntry>>;
}

impl<P: ContentProvider + ?Sized> ContentProvider for &P {
    fn list_posts(&self, sort: SortMode, window: Option<TimeWindow>, limit: usize) -> Result<Vec<PostEntry>> {
        (**self).list_posts(sort, window, limit)
    }

    fn list_comments(&self, post: &Post) -> Result<Vec<CommentEntry>> {
        (**self).list_comments(post)
    }
}
