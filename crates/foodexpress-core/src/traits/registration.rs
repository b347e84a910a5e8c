//! Sync registration trait.

use async_trait::async_trait;

use crate::result::AppResult;

/// Requests a future sync trigger from the hosting environment.
///
/// Registration failure never affects queue durability: the caller logs it
/// and the queued alerts wait for whatever sync trigger arrives next.
#[async_trait]
pub trait SyncRegistration: Send + Sync + std::fmt::Debug + 'static {
    /// Request that a sync event with the given tag be fired once
    /// connectivity is restored.
    async fn register(&self, tag: &str) -> AppResult<()>;
}
