//! Recent-search API client
//!
//! Fetches posts matching a hashtag from the platform's recent-search
//! endpoint and maps the wire records into validated [`Post`] values. A
//! record that fails validation is logged and skipped; one bad record never
//! aborts the batch. Authentication is a bearer token; pagination and rate
//! limiting beyond a single request are left to the caller.

use crate::config::{ApiConfig, ConfigurationError};
use crate::models::{Language, Post, RawPost};
use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Default API base URL
const DEFAULT_BASE_URL: &str = "https://api.twitter.com";

/// Recent-search endpoint path
const SEARCH_PATH: &str = "/2/tweets/search/recent";

/// Errors that can occur while fetching posts
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Search parameters are invalid
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] ConfigurationError),

    /// Base URL could not be parsed
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Parameters of one recent-search call
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Hashtag term, with or without the leading `#`
    pub hashtag: String,

    /// Restrict results to a language; `None` searches all languages
    pub language: Option<Language>,

    /// Maximum posts to fetch (the endpoint accepts 10..=100)
    pub max_results: u32,

    /// Days back from now to search (the endpoint covers at most 6 full days)
    pub n_days: i64,
}

fn hashtag_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\p{L}\p{N}_]+$").expect("literal pattern"))
}

impl SearchQuery {
    /// Create a query with the default window (10 posts, 1 day back)
    #[must_use]
    pub fn new(hashtag: impl Into<String>) -> Self {
        Self {
            hashtag: hashtag.into(),
            language: None,
            max_results: 10,
            n_days: 1,
        }
    }

    /// Hashtag term without the leading `#`
    #[must_use]
    pub fn term(&self) -> &str {
        self.hashtag.strip_prefix('#').unwrap_or(&self.hashtag)
    }

    /// Check parameter values
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !hashtag_pattern().is_match(self.term()) {
            return Err(ConfigurationError::InvalidOption {
                option: "hashtag",
                reason: format!("{:?} is not a valid hashtag term", self.hashtag),
            });
        }
        if !(1..=6).contains(&self.n_days) {
            return Err(ConfigurationError::InvalidOption {
                option: "n_days",
                reason: format!("{} is outside 1..=6", self.n_days),
            });
        }
        if !(10..=100).contains(&self.max_results) {
            return Err(ConfigurationError::InvalidOption {
                option: "max_results",
                reason: format!("{} is outside 10..=100", self.max_results),
            });
        }
        Ok(())
    }

    /// Build the search expression, e.g. `#rustlang lang:en`
    #[must_use]
    pub fn expression(&self) -> String {
        match self.language {
            Some(lang) => format!("#{} lang:{}", self.term(), lang.as_str()),
            None => format!("#{}", self.term()),
        }
    }

    fn start_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.n_days)
    }
}

/// Wire shape of the recent-search response
#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<WireTweet>,
    #[serde(default)]
    includes: WireIncludes,
}

#[derive(Debug, Default, Deserialize)]
struct WireIncludes {
    #[serde(default)]
    users: Vec<WireUser>,
}

#[derive(Debug, Deserialize)]
struct WireTweet {
    id: String,
    text: String,
    #[serde(default)]
    author_id: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    public_metrics: Option<WireMetrics>,
}

#[derive(Debug, Default, Deserialize)]
struct WireMetrics {
    #[serde(default)]
    like_count: i64,
    #[serde(default)]
    retweet_count: i64,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    verified: bool,
}

/// Recent-search API client
pub struct SearchClient {
    client: Client,
    bearer_token: String,
    base_url: String,
}

impl SearchClient {
    /// Create a client from API configuration
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            bearer_token: config.bearer_token.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    /// Override the base URL (for tests with a mock server)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch posts for one search query
    ///
    /// Returns the validated posts in the order the API delivered them.
    pub async fn search_recent(&self, query: &SearchQuery) -> Result<Vec<Post>, FetchError> {
        query.validate()?;

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::InvalidBaseUrl(e.to_string()))?;
        url.set_path(SEARCH_PATH);
        url.query_pairs_mut()
            .append_pair("query", &query.expression())
            .append_pair("start_time", &query.start_time(Utc::now()).to_rfc3339())
            .append_pair("max_results", &query.max_results.to_string())
            .append_pair("tweet.fields", "created_at,public_metrics")
            .append_pair("expansions", "author_id")
            .append_pair("user.fields", "username,location,verified");

        debug!(expression = %query.expression(), "executing recent search");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SearchResponse = response.json().await?;
        Ok(map_posts(body))
    }
}

/// Join tweets with their authors and validate into posts
fn map_posts(response: SearchResponse) -> Vec<Post> {
    let users: HashMap<&str, &WireUser> = response
        .includes
        .users
        .iter()
        .map(|u| (u.id.as_str(), u))
        .collect();

    let mut posts = Vec::with_capacity(response.data.len());

    for tweet in &response.data {
        let user = tweet.author_id.as_deref().and_then(|id| users.get(id));
        let metrics = tweet.public_metrics.as_ref();

        let raw = RawPost {
            id: Some(tweet.id.clone()),
            text: Some(tweet.text.clone()),
            author_handle: user.map(|u| u.username.clone()),
            is_verified: user.map(|u| u.verified).unwrap_or(false),
            location: user.and_then(|u| u.location.clone()),
            like_count: metrics.map(|m| m.like_count).unwrap_or(0),
            repost_count: metrics.map(|m| m.retweet_count).unwrap_or(0),
            created_at: tweet.created_at,
        };

        match Post::from_raw(raw) {
            Ok(post) => posts.push(post),
            Err(err) => {
                warn!(tweet_id = %tweet.id, error = %err, "skipping invalid record");
            }
        }
    }

    posts
}
