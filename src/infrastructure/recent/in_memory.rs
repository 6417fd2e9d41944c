//! In-process recent prediction list.

use super::service::{RecentStore, StoreResult};
use crate::domain::entities::RecentPrediction;
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::RwLock;
use tracing::debug;

/// Bounded newest-first list of predictions.
///
/// Once `capacity` entries are stored, each push drops the oldest one.
/// Contents are lost on restart.
pub struct InMemoryRecentStore {
    entries: RwLock<VecDeque<RecentPrediction>>,
    capacity: usize,
}

impl InMemoryRecentStore {
    /// Creates an empty store. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        debug!("Recent store holds up to {} predictions", capacity);
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }
}

#[async_trait]
impl RecentStore for InMemoryRecentStore {
    async fn push(&self, entry: RecentPrediction) -> StoreResult<()> {
        let mut entries = self.entries.write().await;
        entries.push_front(entry);
        entries.truncate(self.capacity);
        Ok(())
    }

    async fn list(&self, limit: usize) -> StoreResult<Vec<RecentPrediction>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().take(limit).cloned().collect())
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    async fn health_check(&self) -> bool {
        true
    }
}
