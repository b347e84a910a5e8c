//! Fetch interception handler.

use foodexpress_core::types::http::FetchRequest;
use foodexpress_fetch::FetchDecision;

use crate::state::WorkerState;

/// Intercept one outgoing request. Exactly one decision per request:
/// a cache hit, a network response, an offline fallback, or passthrough
/// for requests the interceptor does not handle.
pub async fn intercept(state: &WorkerState, request: &FetchRequest) -> FetchDecision {
    state.interceptor.intercept(request).await
}
