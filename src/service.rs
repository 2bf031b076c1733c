use crate::client::HackerNews;
use crate::fetcher::{fetch_batched, DEFAULT_BATCH_SIZE};
use crate::filters::{filter_by_date, select_top_user_stories};
use crate::types::{ItemId, Result, Story, User, WordCount};
use crate::words::top_words;
use chrono::{Duration, Utc};
use futures::future::join_all;
use std::sync::Arc;
use tracing::info;

/// Default number of ranked words returned by every pipeline.
pub const DEFAULT_UNIQUE_WORDS: usize = 10;
/// Default story subset for the latest-stories pipeline.
pub const DEFAULT_RECENT_STORIES: usize = 25;
/// Default per-user story subset for the top-users pipeline.
pub const DEFAULT_TOP_USER_STORIES: usize = 600;
/// Default karma bar a user must exceed to count as a top user.
pub const DEFAULT_KARMA_THRESHOLD: i64 = 10_000;
/// User profiles are heavier than items, so they are fetched in smaller
/// batches.
pub const USER_BATCH_SIZE: usize = 5;
/// Window of the last-week pipeline, in days.
pub const LAST_WEEK_DAYS: i64 = 7;

/// Word-trend pipelines over a Hacker News source.
///
/// Each method is a one-shot, stateless run: identifiers in, ranked words
/// out. Item-level fetch failures are tolerated along the way; only a
/// failure of a required identifier feed aborts the run.
pub struct TrendsService {
    source: Arc<dyn HackerNews>,
}

impl TrendsService {
    pub fn new(source: Arc<dyn HackerNews>) -> Self {
        Self { source }
    }

    /// Top `unique` words across the titles of the latest `story_limit`
    /// stories.
    pub async fn latest_top_words(
        &self,
        unique: usize,
        story_limit: usize,
    ) -> Result<Vec<WordCount>> {
        let ids = self.fetch_story_ids(Some(story_limit)).await?;
        let stories = self.fetch_stories(&ids, DEFAULT_BATCH_SIZE).await;

        let titles: Vec<String> = stories
            .into_iter()
            .flatten()
            .map(|story| story.title)
            .collect();
        info!("latest pipeline: {} titles from {} ids", titles.len(), ids.len());

        Ok(top_words(&titles, unique))
    }

    /// Top `unique` words across the titles of stories from exactly the
    /// last seven days.
    pub async fn last_week_top_words(&self, unique: usize) -> Result<Vec<WordCount>> {
        let ids = self.fetch_story_ids(None).await?;
        let stories = self.fetch_stories(&ids, DEFAULT_BATCH_SIZE).await;

        let cutoff = Utc::now() - Duration::days(LAST_WEEK_DAYS);
        let recent = filter_by_date(stories, cutoff);

        let titles: Vec<String> = recent.into_iter().map(|story| story.title).collect();
        info!("last-week pipeline: {} titles from {} ids", titles.len(), ids.len());

        Ok(top_words(&titles, unique))
    }

    /// Top `unique` words across titles of stories submitted by users whose
    /// karma exceeds `karma_threshold`, at most `story_limit` stories per
    /// user.
    pub async fn top_users_top_words(
        &self,
        unique: usize,
        story_limit: usize,
        karma_threshold: i64,
    ) -> Result<Vec<WordCount>> {
        let (user_ids, story_ids) =
            tokio::try_join!(self.source.user_ids(), self.fetch_story_ids(None))?;

        // Users whose profile fetch failed are dropped here.
        let users: Vec<User> = fetch_batched(&user_ids, USER_BATCH_SIZE, |id| async move {
            self.source.user(&id).await
        })
        .await
        .into_iter()
        .flatten()
        .collect();
        info!("top-users pipeline: {}/{} profiles fetched", users.len(), user_ids.len());

        let per_user = select_top_user_stories(&users, karma_threshold, &story_ids, story_limit);

        // One batched fetch per qualifying user, all users in flight
        // together; each inner fetch still respects the story batch size.
        let per_user_stories = join_all(
            per_user
                .iter()
                .map(|ids| self.fetch_stories(ids, DEFAULT_BATCH_SIZE)),
        )
        .await;

        let titles: Vec<String> = per_user_stories
            .into_iter()
            .flatten()
            .flatten()
            .map(|story| story.title)
            .collect();
        info!("top-users pipeline: {} titles", titles.len());

        Ok(top_words(&titles, unique))
    }

    /// The new-stories feed, optionally truncated to the first `limit` IDs.
    /// The feed is already newest-first; no local re-sorting.
    async fn fetch_story_ids(&self, limit: Option<usize>) -> Result<Vec<ItemId>> {
        let mut ids = self.source.story_ids().await?;
        if let Some(limit) = limit {
            ids.truncate(limit);
        }
        Ok(ids)
    }

    async fn fetch_stories(&self, ids: &[ItemId], batch_by: usize) -> Vec<Option<Story>> {
        fetch_batched(ids, batch_by, |id| async move { self.source.item(id).await }).await
    }
}
