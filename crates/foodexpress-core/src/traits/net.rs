//! Network client trait for outgoing fetches.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::http::{FetchRequest, FetchResponse};

/// Performs a network fetch and returns a response snapshot.
///
/// A connection-level failure (offline, DNS, refused) is an `Err`;
/// a completed HTTP exchange is `Ok` regardless of status code.
#[async_trait]
pub trait NetworkClient: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the request over the network.
    async fn fetch(&self, request: &FetchRequest) -> AppResult<FetchResponse>;
}
