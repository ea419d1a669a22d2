//! Reddit API client.
//!
//! Application-only OAuth (client credentials) over the public JSON API.
//! All calls are blocking; nothing is retried.

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::time::Duration;

use crate::config::Config;
use crate::errors::ScraperError;
use crate::source::{Comment, CommentEntry, ContentProvider, Post, PostEntry, SortMode, TimeWindow};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const OAUTH_BASE: &str = "https://oauth.reddit.com";

/// Maximum page size accepted by listing endpoints
const PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    after: Option<String>,
    #[serde(default)]
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    kind: String,
    data: Value,
}

/// Reddit client bound to one subreddit
pub struct RedditClient {
    client: Client,
    base_url: String,
    subreddit: String,
    token: String,
}

impl RedditClient {
    /// Authenticate and build a client; any failure is a connection error
    pub fn connect(config: &Config) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(config.credentials.user_agent.clone())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ScraperError::SourceConnection(format!("HTTP client: {}", e)))?;

        let response = client
            .post(TOKEN_URL)
            .basic_auth(&config.credentials.client_id, Some(&config.credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .map_err(|e| ScraperError::SourceConnection(format!("token request: {}", e)))?;

        if !response.status().is_success() {
            return Err(ScraperError::SourceConnection(format!(
                "token request rejected: {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .map_err(|e| ScraperError::SourceConnection(format!("token response: {}", e)))?;

        log::info!("Successfully connected to Reddit API (r/{})", config.subreddit);

        Ok(RedditClient {
            client,
            base_url: OAUTH_BASE.to_string(),
            subreddit: config.subreddit.clone(),
            token: token.access_token,
        })
    }

    fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .query(params)
            .send()
            .with_context(|| format!("Request to {} failed", url))?;

        if !response.status().is_success() {
            return Err(anyhow!("API request failed: {} ({})", response.status(), url));
        }

        response.json().context("Failed to decode API response")
    }
}

impl ContentProvider for RedditClient {
    fn list_posts(&self, sort: SortMode, window: Option<TimeWindow>, limit: usize) -> Result<Vec<PostEntry>> {
        let url = format!("{}/r/{}/{}", self.base_url, self.subreddit, sort.as_str());
        let mut posts = Vec::new();
        let mut after: Option<String> = None;

        while posts.len() < limit {
            let mut params = vec![
                ("limit", (limit - posts.len()).min(PAGE_SIZE).to_string()),
                ("raw_json", "1".to_string()),
            ];
            if let Some(w) = window.filter(|_| sort.requires_window()) {
                params.push(("t", w.as_str().to_string()));
            }
            if let Some(cursor) = &after {
                params.push(("after", cursor.clone()));
            }

            let listing: Listing = serde_json::from_value(self.get_json(&url, &params)?)
                .context("Unexpected listing shape")?;

            if listing.data.children.is_empty() {
                break;
            }
            posts.extend(parse_posts(listing.data.children));

            match listing.data.after {
                Some(next) => after = Some(next),
                None => break,
            }
        }

        posts.truncate(limit);
        Ok(posts)
    }

    fn list_comments(&self, post: &Post) -> Result<Vec<CommentEntry>> {
        let url = format!("{}/comments/{}", self.base_url, post.id);
        let body = self.get_json(&url, &[("raw_json", "1".to_string())])?;
        parse_comment_page(body)
    }
}

/// Only `t3` things are posts. A post that fails to decode stays in the
/// listing as an error entry; the listing itself still succeeds.
fn parse_posts(children: Vec<Thing>) -> Vec<PostEntry> {
    children
        .into_iter()
        .filter(|t| t.kind == "t3")
        .map(|t| {
            let id = t
                .data
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("?")
                .to_string();
            serde_json::from_value::<Post>(t.data)
                .map_err(|e| anyhow!("Undecodable post {}: {}", id, e))
        })
        .collect()
}

/// The comments endpoint returns `[post listing, comment listing]`
fn parse_comment_page(body: Value) -> Result<Vec<CommentEntry>> {
    let mut pages: Vec<Listing> =
        serde_json::from_value(body).context("Unexpected comment page shape")?;

    if pages.len() < 2 {
        return Err(anyhow!("Comment page has {} listings, expected 2", pages.len()));
    }

    Ok(flatten_comment_tree(pages.swap_remove(1).data.children))
}

/// Breadth-first flattening of a comment forest. `t1` nodes become entries
/// and `more` placeholders are dropped without being expanded.
fn flatten_comment_tree(roots: Vec<Thing>) -> Vec<CommentEntry> {
    let mut queue: VecDeque<Thing> = roots.into();
    let mut entries = Vec::new();

    while let Some(thing) = queue.pop_front() {
        if thing.kind != "t1" {
            continue;
        }

        if let Some(replies) = thing.data.get("replies").filter(|r| r.is_object()) {
            match serde_json::from_value::<Listing>(replies.clone()) {
                Ok(listing) => queue.extend(listing.data.children),
                Err(e) => log::debug!("Ignoring malformed replies: {}", e),
            }
        }

        entries.push(
            serde_json::from_value::<Comment>(thing.data)
                .map_err(|e| anyhow!("Undecodable comment: {}", e)),
        );
    }

    entries
}
