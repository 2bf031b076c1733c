use crate::types::{ApiConfig, ItemId, Result, Story, TrendsError, Updates, User};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Read-only view of the Hacker News API.
///
/// `TrendsService` only talks to this trait; tests substitute a scripted
/// implementation for the real client.
#[async_trait]
pub trait HackerNews: Send + Sync {
    /// IDs from the new-stories feed, most recent first.
    async fn story_ids(&self) -> Result<Vec<ItemId>>;

    /// Recently active user names from the updates feed.
    async fn user_ids(&self) -> Result<Vec<String>>;

    async fn item(&self, id: ItemId) -> Result<Story>;

    async fn user(&self, id: &str) -> Result<User>;
}

/// HTTP client for the Hacker News Firebase API.
pub struct HnClient {
    http: Client,
    base_url: String,
}

impl HnClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        // Validate the origin up front so a bad BASE_URL fails at startup,
        // not on the first request.
        Url::parse(&config.base_url)?;

        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TrendsError::Status {
                url,
                status: status.as_u16(),
            });
        }

        // A missing item comes back as HTTP 200 with a literal `null` body,
        // which fails decoding here and is reported as an error.
        response
            .json::<T>()
            .await
            .map_err(|source| TrendsError::Decode { url, source })
    }
}

#[async_trait]
impl HackerNews for HnClient {
    async fn story_ids(&self) -> Result<Vec<ItemId>> {
        self.get_json(format!("{}/newstories.json", self.base_url))
            .await
    }

    async fn user_ids(&self) -> Result<Vec<String>> {
        let updates: Updates = self
            .get_json(format!("{}/updates.json", self.base_url))
            .await?;
        Ok(updates.profiles)
    }

    async fn item(&self, id: ItemId) -> Result<Story> {
        self.get_json(format!("{}/item/{}.json", self.base_url, id))
            .await
    }

    async fn user(&self, id: &str) -> Result<User> {
        self.get_json(format!("{}/user/{}.json", self.base_url, id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        assert!(matches!(
            HnClient::new(&config),
            Err(TrendsError::InvalidUrl(_))
        ));
    }

    #[test]
    fn trims_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:8080/v0/".to_string(),
            ..ApiConfig::default()
        };
        let client = HnClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/v0");
    }
}
