use crate::types::{ItemId, Story, User};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Keep stories created strictly after `cutoff`, dropping fetch failures.
///
/// Records are only read and moved, never mutated; filtering an already
/// filtered sequence with the same cutoff is a no-op.
pub fn filter_by_date(records: Vec<Option<Story>>, cutoff: DateTime<Utc>) -> Vec<Story> {
    let cutoff_secs = cutoff.timestamp();
    records
        .into_iter()
        .flatten()
        .filter(|story| story.time > cutoff_secs)
        .collect()
}

/// Pick the story IDs to fetch for each high-reputation user.
///
/// Users at or below `karma_threshold` are dropped. For each remaining user
/// the candidate feed is intersected with the user's `submitted` set, in
/// candidate order; since the feed is newest-first, truncating to
/// `stories_per_user` keeps the user's most recent qualifying stories.
///
/// Returns one ID list per kept user; the caller fetches each list
/// independently and flattens the results.
pub fn select_top_user_stories(
    users: &[User],
    karma_threshold: i64,
    candidate_ids: &[ItemId],
    stories_per_user: usize,
) -> Vec<Vec<ItemId>> {
    users
        .iter()
        .filter(|user| user.karma > karma_threshold)
        .map(|user| {
            let submitted: HashSet<ItemId> = user.submitted.iter().copied().collect();
            candidate_ids
                .iter()
                .filter(|id| submitted.contains(id))
                .take(stories_per_user)
                .copied()
                .collect()
        })
        .collect()
}
