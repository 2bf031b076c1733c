use crate::service::{
    TrendsService, DEFAULT_KARMA_THRESHOLD, DEFAULT_RECENT_STORIES, DEFAULT_TOP_USER_STORIES,
    DEFAULT_UNIQUE_WORDS,
};
use crate::types::{Result, WordCount};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// The one message callers ever see for a failed pipeline run; internal
/// causes stay in the logs.
pub const UPSTREAM_ERROR_MESSAGE: &str = "Error while fetching data from Hacker News API";

pub fn router(service: Arc<TrendsService>) -> Router {
    Router::new()
        .route("/api/recent", get(recent))
        .route("/api/last-week", get(last_week))
        .route("/api/users-fav-word", get(users_fav_word))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    #[serde(rename = "unique-word", default = "default_unique")]
    unique: usize,
    #[serde(rename = "story-size", default = "default_recent_stories")]
    story: usize,
}

#[derive(Debug, Deserialize)]
struct LastWeekQuery {
    #[serde(rename = "unique-word", default = "default_unique")]
    unique: usize,
}

#[derive(Debug, Deserialize)]
struct TopUsersQuery {
    #[serde(rename = "unique-word", default = "default_unique")]
    unique: usize,
    #[serde(rename = "story-size", default = "default_top_user_stories")]
    story: usize,
    #[serde(default = "default_karma")]
    karma: i64,
}

fn default_unique() -> usize {
    DEFAULT_UNIQUE_WORDS
}

fn default_recent_stories() -> usize {
    DEFAULT_RECENT_STORIES
}

fn default_top_user_stories() -> usize {
    DEFAULT_TOP_USER_STORIES
}

fn default_karma() -> i64 {
    DEFAULT_KARMA_THRESHOLD
}

#[derive(Serialize)]
struct ErrorBody {
    message: &'static str,
}

async fn recent(
    State(service): State<Arc<TrendsService>>,
    Query(query): Query<RecentQuery>,
) -> Response {
    to_response(service.latest_top_words(query.unique, query.story).await)
}

async fn last_week(
    State(service): State<Arc<TrendsService>>,
    Query(query): Query<LastWeekQuery>,
) -> Response {
    to_response(service.last_week_top_words(query.unique).await)
}

async fn users_fav_word(
    State(service): State<Arc<TrendsService>>,
    Query(query): Query<TopUsersQuery>,
) -> Response {
    to_response(
        service
            .top_users_top_words(query.unique, query.story, query.karma)
            .await,
    )
}

/// Translate a pipeline outcome at the boundary: success is the ranked word
/// list, any fatal error becomes a single generic 500.
fn to_response(result: Result<Vec<WordCount>>) -> Response {
    match result {
        Ok(words) => Json(words).into_response(),
        Err(e) => {
            error!("pipeline failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    message: UPSTREAM_ERROR_MESSAGE,
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HackerNews;
    use crate::types::{ItemId, Story, TrendsError, User};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    /// Source where every request fails, as if the upstream API were down.
    struct DownHn;

    #[async_trait]
    impl HackerNews for DownHn {
        async fn story_ids(&self) -> crate::types::Result<Vec<ItemId>> {
            Err(TrendsError::General("connection refused".to_string()))
        }

        async fn user_ids(&self) -> crate::types::Result<Vec<String>> {
            Err(TrendsError::General("connection refused".to_string()))
        }

        async fn item(&self, id: ItemId) -> crate::types::Result<Story> {
            Err(TrendsError::General(format!("no item {id}")))
        }

        async fn user(&self, id: &str) -> crate::types::Result<User> {
            Err(TrendsError::General(format!("no user {id}")))
        }
    }

    /// A feed of 30 stories with one distinct word each, plus one user just
    /// below the default karma bar.
    #[derive(Default)]
    struct CannedHn {
        item_calls: AtomicUsize,
    }

    #[async_trait]
    impl HackerNews for CannedHn {
        async fn story_ids(&self) -> crate::types::Result<Vec<ItemId>> {
            Ok((1..=30).collect())
        }

        async fn user_ids(&self) -> crate::types::Result<Vec<String>> {
            Ok(vec!["almost".to_string()])
        }

        async fn item(&self, id: ItemId) -> crate::types::Result<Story> {
            self.item_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Story {
                id,
                title: format!("token{id}"),
                time: Utc::now().timestamp(),
                by: None,
                score: None,
                url: None,
                descendants: None,
            })
        }

        async fn user(&self, id: &str) -> crate::types::Result<User> {
            Ok(User {
                id: id.to_string(),
                karma: 9_999,
                submitted: (1..=30).collect(),
                created: None,
                about: None,
            })
        }
    }

    fn app(source: Arc<dyn HackerNews>) -> Router {
        router(Arc::new(TrendsService::new(source)))
    }

    async fn send_get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn failed_pipeline_becomes_a_generic_500() {
        for uri in ["/api/recent", "/api/last-week", "/api/users-fav-word"] {
            let (status, body) = send_get(app(Arc::new(DownHn)), uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");

            let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(value["message"], UPSTREAM_ERROR_MESSAGE);
            // The internal cause stays in the logs, never in the body.
            let raw = String::from_utf8(body).unwrap();
            assert!(!raw.contains("connection refused"), "{raw}");
        }
    }

    #[tokio::test]
    async fn recent_without_query_params_uses_documented_defaults() {
        let source = Arc::new(CannedHn::default());

        let (status, body) = send_get(app(source.clone()), "/api/recent").await;
        assert_eq!(status, StatusCode::OK);

        // story-size defaults to 25: only 25 of the 30 feed IDs are fetched.
        assert_eq!(source.item_calls.load(Ordering::SeqCst), 25);
        // unique-word defaults to 10 out of the 25 distinct words.
        let ranked: Vec<WordCount> = serde_json::from_slice(&body).unwrap();
        assert_eq!(ranked.len(), 10);
    }

    #[tokio::test]
    async fn query_parameter_names_match_the_original_routes() {
        let (status, body) = send_get(
            app(Arc::new(CannedHn::default())),
            "/api/last-week?unique-word=3",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let ranked: Vec<WordCount> = serde_json::from_slice(&body).unwrap();
        assert_eq!(ranked.len(), 3);
    }

    #[tokio::test]
    async fn users_fav_word_defaults_to_the_10000_karma_bar() {
        // The only user sits at 9999 karma, so the default threshold leaves
        // no stories and an empty ranking, not an error.
        let (status, body) = send_get(app(Arc::new(CannedHn::default())), "/api/users-fav-word").await;
        assert_eq!(status, StatusCode::OK);

        let ranked: Vec<WordCount> = serde_json::from_slice(&body).unwrap();
        assert!(ranked.is_empty());
    }
}
