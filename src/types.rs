use serde::{Deserialize, Serialize};

/// Identifier of a Hacker News item (story, comment, poll or job).
/// Source lists may contain duplicates; no uniqueness is enforced here.
pub type ItemId = u64;

/// A story as returned by `GET {base}/item/{id}.json`.
///
/// `title` and `time` are required; an item missing either (comments, dead
/// entries, malformed payloads) fails to decode and the batched fetcher
/// records it as `None` rather than fabricating a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: ItemId,
    pub title: String,
    /// Creation time in unix seconds.
    pub time: i64,
    #[serde(default)]
    pub by: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub descendants: Option<u64>,
}

/// A user profile as returned by `GET {base}/user/{id}.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub karma: i64,
    /// Everything the user ever submitted, newest first. Mixes stories,
    /// comments and polls; only the intersection with a known story-ID set
    /// is treated as stories.
    #[serde(default)]
    pub submitted: Vec<ItemId>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub about: Option<String>,
}

/// Body of `GET {base}/updates.json`; only the profile list is used.
#[derive(Debug, Clone, Deserialize)]
pub struct Updates {
    pub profiles: Vec<String>,
}

/// One entry of a top-K word ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// Connection settings for the Hacker News API, injected once at client
/// construction.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin of the API, without a trailing slash.
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://hacker-news.firebaseio.com/v0".to_string(),
            user_agent: "hn-trends/0.1".to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TrendsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, TrendsError>;
