// Hinglish Sentiment - Core Library
// Collects Hinglish stock-market comments, labels their sentiment, builds a CSV dataset

pub mod errors;
pub mod config;
pub mod normalizer;
pub mod detector;       // Language-mix gate
pub mod sentiment;      // Lexicon classifier
pub mod source;         // Abstract content provider
pub mod reddit;         // Reddit implementation of the provider
pub mod dataset;
pub mod deduplication;
pub mod collector;      // Multi-pass orchestrator
pub mod raw_dump;
pub mod report;

// Re-export commonly used types
pub use errors::ScraperError;
pub use config::{Config, Credentials};
pub use normalizer::{normalize, normalize_text};
pub use detector::{DetectionReport, HinglishDetector, Verdict};
pub use sentiment::{Sentiment, SentimentClassifier, SentimentTally};
pub use source::{Comment, CommentEntry, ContentProvider, Post, PostEntry, SortMode, TimeWindow};
pub use reddit::RedditClient;
pub use dataset::{
    ClassifiedRecord, DatasetRow, PostContext,
    load_dataset, write_dataset, to_rows, DEFAULT_DATASET_FILE,
};
pub use deduplication::{dedup_by_comment, DedupResult, DuplicateMatch};
pub use collector::{
    CollectionPass, CollectionReport, Collector, PassOutcome, PassStatus, SkippedItem,
    default_passes,
};
pub use raw_dump::{
    RawCommentRow, RawDump, RawDumpOptions,
    raw_dump, write_raw_dump, load_raw_dump, default_raw_filename,
};
pub use report::{DatasetSummary, RawDumpStats};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
