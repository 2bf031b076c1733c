use crate::types::Result;
use futures::future::join_all;
use std::fmt::Display;
use std::future::Future;
use tracing::warn;

/// Default batch size for story fetches.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Fetch one record per identifier, `batch_by` at a time.
///
/// Identifiers are partitioned into consecutive chunks; all fetches within a
/// chunk run concurrently and the chunk fully settles before the next one
/// starts, so at most `batch_by` requests are ever outstanding. The result
/// has the same length as `ids` and `result[i]` corresponds to `ids[i]`
/// regardless of completion order.
///
/// An individual fetch failure becomes `None` and never fails the chunk;
/// downstream stages skip the holes.
pub async fn fetch_batched<I, T, F, Fut>(ids: &[I], batch_by: usize, fetch: F) -> Vec<Option<T>>
where
    I: Clone + Display,
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let batch_by = batch_by.max(1);
    let mut records = Vec::with_capacity(ids.len());

    for chunk in ids.chunks(batch_by) {
        let settled = join_all(chunk.iter().cloned().map(&fetch)).await;

        for (id, outcome) in chunk.iter().zip(settled) {
            match outcome {
                Ok(record) => records.push(Some(record)),
                Err(e) => {
                    warn!("fetch failed for {}: {}", id, e);
                    records.push(None);
                }
            }
        }
    }

    records
}
