//! # foodexpress-fetch
//!
//! Request interception for the offline agent: cache-first lookups, a
//! dynamic-cache policy, network fetches via reqwest, and synthesized
//! offline fallbacks when both cache and network fail.

pub mod client;
pub mod interceptor;
pub mod policy;

pub use client::ReqwestNetworkClient;
pub use interceptor::{FetchDecision, RequestInterceptor};
