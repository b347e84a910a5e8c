//! A named, versioned cache generation.

use std::time::Duration;

use dashmap::DashMap;
use moka::future::Cache;

use foodexpress_core::config::cache::CacheConfig;
use foodexpress_core::types::http::FetchResponse;

/// What a generation is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPurpose {
    /// App shell assets installed from the manifest.
    Static,
    /// Responses cached by interception policy.
    Dynamic,
}

/// Entry storage backing a generation.
///
/// The static generation holds exactly the manifest and is never evicted,
/// so a plain concurrent map is enough. The dynamic generation is bounded
/// and TTL-limited, which is moka's job.
#[derive(Debug)]
enum Entries {
    Static(DashMap<String, FetchResponse>),
    Dynamic(Cache<String, FetchResponse>),
}

/// A named cache generation holding response snapshots keyed by request.
///
/// Entries are immutable once stored; a later store for the same key
/// replaces the snapshot wholesale. Concurrent reads and writes to
/// independent keys need no coordination.
#[derive(Debug)]
pub struct CacheGeneration {
    name: String,
    purpose: GenerationPurpose,
    entries: Entries,
}

impl CacheGeneration {
    /// Create a static generation pre-populated with the given entries.
    ///
    /// Population happens at construction so the caller can stage all
    /// manifest fetches first and only publish a complete generation.
    pub fn new_static(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (String, FetchResponse)>,
    ) -> Self {
        let map = DashMap::new();
        for (key, response) in entries {
            map.insert(key, response);
        }
        Self {
            name: name.into(),
            purpose: GenerationPurpose::Static,
            entries: Entries::Static(map),
        }
    }

    /// Create an empty dynamic generation bounded by configuration.
    pub fn new_dynamic(name: impl Into<String>, config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.dynamic_max_capacity)
            .time_to_live(Duration::from_secs(config.dynamic_ttl_seconds))
            .build();
        Self {
            name: name.into(),
            purpose: GenerationPurpose::Dynamic,
            entries: Entries::Dynamic(cache),
        }
    }

    /// The generation name (versioned).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The generation purpose.
    pub fn purpose(&self) -> GenerationPurpose {
        self.purpose
    }

    /// Look up a stored response by request key.
    pub async fn get(&self, key: &str) -> Option<FetchResponse> {
        match &self.entries {
            Entries::Static(map) => map.get(key).map(|entry| entry.value().clone()),
            Entries::Dynamic(cache) => cache.get(key).await,
        }
    }

    /// Store a response snapshot under a request key.
    pub async fn insert(&self, key: String, response: FetchResponse) {
        match &self.entries {
            Entries::Static(map) => {
                map.insert(key, response);
            }
            Entries::Dynamic(cache) => {
                cache.insert(key, response).await;
            }
        }
    }

    /// Whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        match &self.entries {
            Entries::Static(map) => map.contains_key(key),
            Entries::Dynamic(cache) => cache.contains_key(key),
        }
    }

    /// All stored request keys.
    pub fn keys(&self) -> Vec<String> {
        match &self.entries {
            Entries::Static(map) => map.iter().map(|entry| entry.key().clone()).collect(),
            Entries::Dynamic(cache) => cache.iter().map(|(key, _)| (*key).clone()).collect(),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        match &self.entries {
            Entries::Static(map) => map.len(),
            Entries::Dynamic(cache) => cache.iter().count(),
        }
    }

    /// Whether the generation holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use foodexpress_core::types::http::ResponseKind;
    use http::StatusCode;

    fn response(body: &str) -> FetchResponse {
        FetchResponse::new(
            StatusCode::OK,
            Some("text/html".to_string()),
            Bytes::from(body.to_string()),
            ResponseKind::Basic,
        )
    }

    #[tokio::test]
    async fn test_static_generation_holds_population() {
        let generation = CacheGeneration::new_static(
            "foodexpress-static-v1.0.0",
            vec![
                ("GET http://a/".to_string(), response("a")),
                ("GET http://b/".to_string(), response("b")),
            ],
        );
        assert_eq!(generation.len(), 2);
        assert!(generation.contains("GET http://a/"));
        let hit = generation.get("GET http://b/").await.unwrap();
        assert_eq!(hit.body, Bytes::from("b"));
    }

    #[tokio::test]
    async fn test_dynamic_generation_insert_and_get() {
        let generation =
            CacheGeneration::new_dynamic("foodexpress-dynamic-v1.0.0", &CacheConfig::default());
        assert!(generation.is_empty());
        generation
            .insert("GET http://a/api/x".to_string(), response("x"))
            .await;
        assert!(generation.contains("GET http://a/api/x"));
        assert_eq!(generation.purpose(), GenerationPurpose::Dynamic);
    }

    #[tokio::test]
    async fn test_insert_overwrites_same_key() {
        let generation = CacheGeneration::new_static("s", vec![]);
        generation.insert("k".to_string(), response("old")).await;
        generation.insert("k".to_string(), response("new")).await;
        assert_eq!(generation.get("k").await.unwrap().body, Bytes::from("new"));
        assert_eq!(generation.len(), 1);
    }
}
