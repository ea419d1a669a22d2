// ⚠️ Error Taxonomy
// Startup errors are fatal, pass/item errors are recorded and the run continues

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScraperError {
    /// Missing or invalid credentials/settings, raised before any network call
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Content-source client could not be initialized
    #[error("failed to connect to content source: {0}")]
    SourceConnection(String),

    /// A whole pass's listing call failed; the pass is skipped
    #[error("pass '{pass}' failed: {reason}")]
    PassFetch { pass: String, reason: String },

    /// A single post or comment could not be retrieved or decoded
    #[error("failed to fetch {item}: {reason}")]
    ItemFetch { item: String, reason: String },
}

impl ScraperError {
    pub fn pass_fetch(pass: &str, err: &anyhow::Error) -> Self {
        ScraperError::PassFetch {
            pass: pass.to_string(),
            reason: format!("{:#}", err),
        }
    }

    pub fn item_fetch(item: impl Into<String>, err: &anyhow::Error) -> Self {
        ScraperError::ItemFetch {
            item: item.into(),
            reason: format!("{:#}", err),
        }
    }

    /// True for errors that must stop the program at startup
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ScraperError::Configuration(_) | ScraperError::SourceConnection(_)
        )
    }
}
