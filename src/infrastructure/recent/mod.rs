//! Recent prediction storage.
//!
//! Provides a [`RecentStore`] trait with two implementations:
//! - [`InMemoryRecentStore`] - Bounded newest-first list held in process memory
//! - [`NullRecentStore`] - No-op implementation for disabled history

mod in_memory;
mod null_store;
mod service;

pub use in_memory::InMemoryRecentStore;
pub use null_store::NullRecentStore;
pub use service::{RecentStore, StoreError, StoreResult};

#[cfg(test)]
pub use service::MockRecentStore;
