//! No-op recent store.

use super::service::{RecentStore, StoreResult};
use crate::domain::entities::RecentPrediction;
use async_trait::async_trait;
use tracing::debug;

/// A recent store that discards everything.
///
/// Used when prediction history is disabled.
pub struct NullRecentStore;

impl NullRecentStore {
    pub fn new() -> Self {
        debug!("Using NullRecentStore (history disabled)");
        Self
    }
}

impl Default for NullRecentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecentStore for NullRecentStore {
    async fn push(&self, _entry: RecentPrediction) -> StoreResult<()> {
        Ok(())
    }

    async fn list(&self, _limit: usize) -> StoreResult<Vec<RecentPrediction>> {
        Ok(Vec::new())
    }

    fn capacity(&self) -> usize {
        0
    }

    async fn health_check(&self) -> bool {
        true
    }
}
