//! Recent store trait and error types.

use crate::domain::entities::RecentPrediction;
use async_trait::async_trait;

/// Errors that can occur while reading or writing recent predictions.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Recent store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for recent store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage for the most recent predictions served to users.
///
/// Implementations must be thread-safe. Failures are never fatal to a
/// prediction: callers log them and carry on.
///
/// # Implementations
///
/// - [`crate::infrastructure::recent::InMemoryRecentStore`] - Bounded in-process list
/// - [`crate::infrastructure::recent::NullRecentStore`] - No-op implementation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecentStore: Send + Sync {
    /// Records a prediction, evicting the oldest entry when full.
    async fn push(&self, entry: RecentPrediction) -> StoreResult<()>;

    /// Returns up to `limit` entries, newest first.
    async fn list(&self, limit: usize) -> StoreResult<Vec<RecentPrediction>>;

    /// Maximum number of entries retained.
    fn capacity(&self) -> usize;

    /// Checks if the store can accept writes.
    ///
    /// Used by the health endpoint.
    async fn health_check(&self) -> bool;
}
