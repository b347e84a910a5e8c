//! Dynamic cache configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the dynamic response cache.
///
/// The static generation is unbounded (it holds exactly the manifest);
/// only the dynamic generation is capacity- and TTL-limited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries in the dynamic generation.
    #[serde(default = "default_dynamic_capacity")]
    pub dynamic_max_capacity: u64,
    /// TTL for dynamic entries in seconds.
    #[serde(default = "default_dynamic_ttl")]
    pub dynamic_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dynamic_max_capacity: default_dynamic_capacity(),
            dynamic_ttl_seconds: default_dynamic_ttl(),
        }
    }
}

fn default_dynamic_capacity() -> u64 {
    256
}

fn default_dynamic_ttl() -> u64 {
    86400
}
