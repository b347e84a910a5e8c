//! # foodexpress-cache
//!
//! Versioned cache generations for the offline agent:
//!
//! - **static**: the app shell assets, installed all-or-nothing from a
//!   fixed manifest and never evicted
//! - **dynamic**: responses cached by interception policy, bounded and
//!   TTL-limited via [moka](https://crates.io/crates/moka)
//!
//! Generation names carry the cache version, so activating a new version
//! purges every generation the previous version created.

pub mod generation;
pub mod keys;
pub mod store;

pub use generation::{CacheGeneration, GenerationPurpose};
pub use store::CacheStore;
