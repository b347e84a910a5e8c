//! Interception and dynamic-cache policy.
//!
//! Both functions are pure over the request so the policy is testable
//! without a cache or a network stack.

use http::Method;
use url::Url;

use foodexpress_core::types::http::FetchRequest;

/// Whether the interceptor handles this request at all.
///
/// Only GET requests to http(s) URLs are intercepted; everything else
/// passes through without touching the cache or the network wrapper.
pub fn is_interceptable(request: &FetchRequest) -> bool {
    request.method == Method::GET && request.is_http()
}

/// Whether a successful response for this URL belongs in the dynamic cache.
///
/// API responses are cached so emergency data stays available offline, and
/// so are third-party assets. Realtime and location data must always be
/// fresh and are never cached.
pub fn should_cache_dynamically(url: &Url, app_origin: &Url) -> bool {
    if url.path().contains("/api/") {
        return true;
    }

    if url.origin() != app_origin.origin() {
        return true;
    }

    if url.path().contains("/realtime/") || url.path().contains("/location/") {
        return false;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("http://localhost:8080").unwrap()
    }

    fn url(path: &str) -> Url {
        origin().join(path).unwrap()
    }

    #[test]
    fn test_api_paths_are_cacheable() {
        assert!(should_cache_dynamically(&url("/api/x"), &origin()));
        assert!(should_cache_dynamically(&url("/api/contacts/list"), &origin()));
    }

    #[test]
    fn test_foreign_origins_are_cacheable() {
        let third_party = Url::parse("https://other-origin.example/y").unwrap();
        assert!(should_cache_dynamically(&third_party, &origin()));
    }

    #[test]
    fn test_realtime_and_location_are_never_cacheable() {
        assert!(!should_cache_dynamically(&url("/realtime/z"), &origin()));
        assert!(!should_cache_dynamically(&url("/location/z"), &origin()));
    }

    #[test]
    fn test_plain_same_origin_is_not_cacheable() {
        assert!(!should_cache_dynamically(&url("/plain"), &origin()));
    }

    #[test]
    fn test_only_http_get_is_intercepted() {
        let get = FetchRequest::get(url("/plain"));
        assert!(is_interceptable(&get));

        let mut post = FetchRequest::get(url("/api/emergency-alert"));
        post.method = Method::POST;
        assert!(!is_interceptable(&post));

        let extension = FetchRequest::get(Url::parse("chrome-extension://abc/x").unwrap());
        assert!(!is_interceptable(&extension));
    }
}
