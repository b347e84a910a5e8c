//! Cache-first request interception with offline fallbacks.

use std::sync::Arc;

use http::StatusCode;
use tracing::{debug, warn};
use url::Url;

use foodexpress_cache::{CacheStore, keys};
use foodexpress_core::traits::net::NetworkClient;
use foodexpress_core::types::http::{FetchRequest, FetchResponse};

use crate::policy;

/// Offline message shown in synthesized fallback responses.
pub const OFFLINE_MESSAGE: &str =
    "Você está offline. Algumas funcionalidades podem não estar disponíveis.";

/// What the interceptor decided for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchDecision {
    /// The request is not ours to handle; the environment performs it
    /// untouched.
    Passthrough,
    /// Exactly one response for the intercepted request.
    Respond(FetchResponse),
}

/// Intercepts outgoing requests with a cache-first, network-fallback
/// strategy.
#[derive(Debug, Clone)]
pub struct RequestInterceptor {
    cache: Arc<CacheStore>,
    client: Arc<dyn NetworkClient>,
    app_origin: Url,
}

impl RequestInterceptor {
    /// Create an interceptor over the given cache and network client.
    pub fn new(cache: Arc<CacheStore>, client: Arc<dyn NetworkClient>, app_origin: Url) -> Self {
        Self {
            cache,
            client,
            app_origin,
        }
    }

    /// Handle one intercepted request.
    ///
    /// Cache hits are returned without a network roundtrip. Misses go to
    /// the network; a successful cacheable response is stored in the
    /// dynamic generation on a spawned task so the caller is not blocked
    /// on the cache write. A failed fetch degrades to the cached app shell
    /// for navigations and to a synthesized offline response otherwise.
    pub async fn intercept(&self, request: &FetchRequest) -> FetchDecision {
        if !policy::is_interceptable(request) {
            return FetchDecision::Passthrough;
        }

        let key = keys::request_key(&request.method, &request.url);
        if let Some(cached) = self.cache.match_request(&key).await {
            return FetchDecision::Respond(cached);
        }

        match self.client.fetch(request).await {
            Ok(response) => {
                if response.is_cache_eligible()
                    && policy::should_cache_dynamically(&request.url, &self.app_origin)
                {
                    let cache = Arc::clone(&self.cache);
                    let stored = response.clone();
                    tokio::spawn(async move {
                        cache.put_dynamic(key, stored).await;
                    });
                }
                FetchDecision::Respond(response)
            }
            Err(e) => {
                debug!(url = %request.url, "Network request failed: {e}");
                self.offline_fallback(request).await
            }
        }
    }

    async fn offline_fallback(&self, request: &FetchRequest) -> FetchDecision {
        if request.is_navigation() {
            if let Some(shell) = self.cache.match_shell(&self.app_origin).await {
                return FetchDecision::Respond(shell);
            }
            warn!("App shell missing from cache during offline navigation");
        }
        FetchDecision::Respond(offline_response())
    }
}

/// The synthesized response returned when both cache and network fail.
pub fn offline_response() -> FetchResponse {
    FetchResponse::json(
        StatusCode::SERVICE_UNAVAILABLE,
        &serde_json::json!({
            "error": "Offline",
            "message": OFFLINE_MESSAGE,
        }),
    )
}
