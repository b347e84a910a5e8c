//! Cache key and generation name builders.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the agent uses.

use http::Method;
use url::Url;

use foodexpress_core::error::AppError;
use foodexpress_core::result::AppResult;

/// Prefix applied to all FoodExpress generation names.
const PREFIX: &str = "foodexpress";

/// Name of the static generation for a cache version.
pub fn static_generation(version: &str) -> String {
    format!("{PREFIX}-static-{version}")
}

/// Name of the dynamic generation for a cache version.
pub fn dynamic_generation(version: &str) -> String {
    format!("{PREFIX}-dynamic-{version}")
}

/// Key under which a request's response is stored: method + full URL.
pub fn request_key(method: &Method, url: &Url) -> String {
    format!("{method} {url}")
}

/// Key of the cached app shell document, used as the navigation fallback.
pub fn shell_request_key(origin: &Url) -> AppResult<String> {
    let shell = origin
        .join("/index.html")
        .map_err(|e| AppError::cache(format!("Invalid shell origin '{origin}': {e}")))?;
    Ok(request_key(&Method::GET, &shell))
}
