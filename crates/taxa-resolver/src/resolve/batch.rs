//! Batch bounding and result capping
//!
//! Nothing larger than `max_batch_size` ever reaches the catalog: id and name
//! sets are split into bounded slices, queried concurrently, and merged
//! before the next phase. The final result is truncated (lossy) to the same
//! bound.

use futures::future::{try_join_all, BoxFuture};
use std::collections::BTreeSet;
use taxa_common::TaxonId;
use tracing::warn;

use crate::catalog::CatalogResult;

/// Split `items` into slices of at most `max_batch_size` (minimum 1)
pub fn bounded_batches<T>(items: &[T], max_batch_size: usize) -> std::slice::Chunks<'_, T> {
    items.chunks(max_batch_size.max(1))
}

/// Issue `fetch` once per bounded batch and concatenate the results.
///
/// An empty `items` slice issues no query.
pub async fn fetch_batched<'a, T, R>(
    items: &'a [T],
    max_batch_size: usize,
    fetch: impl Fn(&'a [T]) -> BoxFuture<'a, CatalogResult<Vec<R>>>,
) -> CatalogResult<Vec<R>> {
    let results = try_join_all(bounded_batches(items, max_batch_size).map(fetch)).await?;
    Ok(results.into_iter().flatten().collect())
}

/// Keep the `max_batch_size` smallest ids.
///
/// This is a safety bound on downstream queries, not a filter: anything
/// past the bound is silently lost to the caller, so it is logged.
pub fn cap_ids(ids: BTreeSet<TaxonId>, max_batch_size: usize) -> BTreeSet<TaxonId> {
    if ids.len() <= max_batch_size {
        return ids;
    }

    warn!(
        resolved = ids.len(),
        max_batch_size,
        "Resolved taxa exceed the batch bound; truncating to the lowest ids"
    );
    ids.into_iter().take(max_batch_size).collect()
}
