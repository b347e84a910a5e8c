//! Request and response snapshots used by the interception pipeline.
//!
//! These are deliberately small value types: the interceptor and cache
//! operate on snapshots, not on live connections.

use bytes::Bytes;
use http::{Method, StatusCode};
use url::Url;

/// Purpose of an intercepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// The request loads a full document (app shell navigation).
    Navigate,
    /// Any subresource request (script, style, API call, image).
    Subresource,
}

/// An intercepted outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: Method,
    pub url: Url,
    pub mode: RequestMode,
}

impl FetchRequest {
    /// A GET subresource request.
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            mode: RequestMode::Subresource,
        }
    }

    /// A GET navigation request.
    pub fn navigate(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            mode: RequestMode::Navigate,
        }
    }

    /// Whether the request targets an http(s) URL.
    pub fn is_http(&self) -> bool {
        matches!(self.url.scheme(), "http" | "https")
    }

    /// Whether this is a navigation request.
    pub fn is_navigation(&self) -> bool {
        self.mode == RequestMode::Navigate
    }
}

/// Classification of a fetched response relative to the app origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Same-origin response with a readable body.
    Basic,
    /// Cross-origin response obtained with CORS.
    Cors,
    /// Cross-origin response with an unreadable body.
    Opaque,
}

/// A response snapshot, either fresh from the network or replayed from
/// cache. Stored entries are immutable; a clone shares the body buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
    pub kind: ResponseKind,
}

impl FetchResponse {
    /// Build a response snapshot.
    pub fn new(
        status: StatusCode,
        content_type: Option<String>,
        body: Bytes,
        kind: ResponseKind,
    ) -> Self {
        Self {
            status,
            content_type,
            body,
            kind,
        }
    }

    /// Build a JSON response snapshot from a serializable value.
    pub fn json(status: StatusCode, value: &serde_json::Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: Bytes::from(value.to_string()),
            kind: ResponseKind::Basic,
        }
    }

    /// Whether the response may be stored: a successful basic response.
    /// Anything else is passed through unmodified and never cached.
    pub fn is_cache_eligible(&self) -> bool {
        self.status == StatusCode::OK && self.kind == ResponseKind::Basic
    }
}
