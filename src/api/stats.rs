//! Aggregate message analytics.

use crate::{models, repo::ImplMessageRepo};

/// Collects the aggregate stats document.
///
/// All aggregation happens inside the storage engine; this function only
/// delegates, so an empty store yields zero counts and null timestamps
/// straight from the repository.
pub async fn collect_stats(repo: &ImplMessageRepo) -> anyhow::Result<models::stats::MessageStats> {
    repo.get_stats().await
}
