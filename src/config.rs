// ⚙️ Configuration - environment / .env settings
// Validated up front so a bad setup never reaches the network

use crate::errors::ScraperError;

pub const DEFAULT_SUBREDDIT: &str = "indianstocks";
pub const DEFAULT_MAX_POSTS: usize = 100;
pub const DEFAULT_COMMENTS_PER_POST: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub credentials: Credentials,

    /// Target forum, without the `r/` prefix
    pub subreddit: String,

    /// Posts per listing call in raw-dump mode
    pub max_posts: usize,

    /// Comments kept per post in raw-dump mode
    pub comments_per_post: usize,
}

impl Config {
    /// Load `.env` (if present) and read the process environment
    pub fn from_env() -> Result<Self, ScraperError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScraperError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials {
            client_id: required(&lookup, "REDDIT_CLIENT_ID")?,
            client_secret: required(&lookup, "REDDIT_CLIENT_SECRET")?,
            user_agent: required(&lookup, "REDDIT_USER_AGENT")?,
        };

        let subreddit = lookup("SUBREDDIT")
            .map(|s| s.trim().trim_start_matches("r/").to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SUBREDDIT.to_string());

        Ok(Config {
            credentials,
            subreddit,
            max_posts: positive(&lookup, "MAX_POSTS", DEFAULT_MAX_POSTS)?,
            comments_per_post: positive(&lookup, "COMMENTS_PER_POST", DEFAULT_COMMENTS_PER_POST)?,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ScraperError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ScraperError::Configuration(format!(
            "{} is missing. Reddit API credentials must be set in the environment or .env file",
            key
        ))),
    }
}

fn positive<F>(lookup: &F, key: &str, default: usize) -> Result<usize, ScraperError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(default),
    };

    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ScraperError::Configuration(format!(
            "{} must be a positive integer, got '{}'",
            key, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn credentials() -> Vec<(&'static str, &'static str)> {
        vec![
            ("REDDIT_CLIENT_ID", "id123"),
            ("REDDIT_CLIENT_SECRET", "secret456"),
            ("REDDIT_USER_AGENT", "hinglish-sentiment/0.1 by tester"),
        ]
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&credentials())).unwrap();

        assert_eq!(config.credentials.client_id, "id123");
        assert_eq!(config.subreddit, "indianstocks");
        assert_eq!(config.max_posts, 100);
        assert_eq!(config.comments_per_post, 50);
    }

    #[test]
    fn test_overrides() {
        let mut pairs = credentials();
        pairs.push(("SUBREDDIT", "r/IndianStockMarket"));
        pairs.push(("MAX_POSTS", "25"));
        pairs.push(("COMMENTS_PER_POST", " 10 "));

        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.subreddit, "IndianStockMarket");
        assert_eq!(config.max_posts, 25);
        assert_eq!(config.comments_per_post, 10);
    }

    #[test]
    fn test_missing_credential_is_configuration_error() {
        let pairs: Vec<_> = credentials()
            .into_iter()
            .filter(|(k, _)| *k != "REDDIT_CLIENT_SECRET")
            .collect();

        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ScraperError::Configuration(ref m) if m.contains("REDDIT_CLIENT_SECRET")));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_blank_credential_rejected() {
        let mut pairs = credentials();
        pairs[0] = ("REDDIT_CLIENT_ID", "   ");

        assert!(Config::from_lookup(lookup_from(&pairs)).is_err());
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        let mut pairs = credentials();
        pairs.push(("MAX_POSTS", "lots"));
        assert!(Config::from_lookup(lookup_from(&pairs)).is_err());

        let mut pairs = credentials();
        pairs.push(("COMMENTS_PER_POST", "0"));
        assert!(Config::from_lookup(lookup_from(&pairs)).is_err());
    }
}
