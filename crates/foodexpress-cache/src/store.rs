//! Cache store owning every live generation.

use std::sync::Arc;

use dashmap::DashMap;
use futures::future;
use tracing::{debug, info, warn};

use foodexpress_core::config::cache::CacheConfig;
use foodexpress_core::config::shell::ShellConfig;
use foodexpress_core::error::AppError;
use foodexpress_core::result::AppResult;
use foodexpress_core::traits::net::NetworkClient;
use foodexpress_core::types::http::{FetchRequest, FetchResponse};

use crate::generation::CacheGeneration;
use crate::keys;

/// Shared registry of generations by name.
///
/// The registry outlives any single [`CacheStore`]: a new agent version
/// builds its store over the same registry and finds the previous
/// version's generations there, exactly what `activate` purges.
pub type GenerationRegistry = Arc<DashMap<String, Arc<CacheGeneration>>>;

/// Owns the static and dynamic generations for the current cache version.
#[derive(Debug, Clone)]
pub struct CacheStore {
    registry: GenerationRegistry,
    static_name: String,
    dynamic_name: String,
    manifest: Vec<url::Url>,
    cache_config: CacheConfig,
}

impl CacheStore {
    /// Create a store with a fresh registry.
    pub fn new(shell: &ShellConfig, cache: &CacheConfig) -> AppResult<Self> {
        Self::with_registry(Arc::new(DashMap::new()), shell, cache)
    }

    /// Create a store over an existing registry, as a new agent version
    /// does against the environment's shared cache storage.
    pub fn with_registry(
        registry: GenerationRegistry,
        shell: &ShellConfig,
        cache: &CacheConfig,
    ) -> AppResult<Self> {
        Ok(Self {
            registry,
            static_name: keys::static_generation(&shell.version),
            dynamic_name: keys::dynamic_generation(&shell.version),
            manifest: shell.manifest_urls()?,
            cache_config: cache.clone(),
        })
    }

    /// Populate the static generation from the manifest, all-or-nothing.
    ///
    /// Every manifest URL is fetched concurrently; the generation is
    /// published only if every fetch succeeds with a success status. On
    /// failure the registry is left untouched, so a previous install (if
    /// any) keeps serving.
    pub async fn install(&self, client: &dyn NetworkClient) -> AppResult<()> {
        let fetches = self.manifest.iter().map(|url| async move {
            let request = FetchRequest::get(url.clone());
            let response = client.fetch(&request).await?;
            if !response.status.is_success() {
                return Err(AppError::install(format!(
                    "Manifest asset '{url}' returned status {}",
                    response.status
                )));
            }
            Ok((keys::request_key(&request.method, &request.url), response))
        });

        let staged = future::try_join_all(fetches)
            .await
            .map_err(|e| AppError::install(format!("Static cache install failed: {e}")))?;

        let generation = CacheGeneration::new_static(self.static_name.clone(), staged);
        info!(
            generation = %self.static_name,
            assets = generation.len(),
            "Installed static cache generation"
        );
        self.registry
            .insert(self.static_name.clone(), Arc::new(generation));
        Ok(())
    }

    /// Delete every generation that is not the current static/dynamic
    /// pair. Returns the purged names.
    pub fn activate(&self) -> Vec<String> {
        let stale: Vec<String> = self
            .registry
            .iter()
            .map(|entry| entry.key().clone())
            .filter(|name| name != &self.static_name && name != &self.dynamic_name)
            .collect();

        for name in &stale {
            self.registry.remove(name);
            info!(generation = %name, "Deleted stale cache generation");
        }
        stale
    }

    /// Look up a request key in any live generation, static first.
    pub async fn match_request(&self, key: &str) -> Option<FetchResponse> {
        // Clone the Arcs out so no registry guard is held across an await.
        let static_generation = self
            .registry
            .get(&self.static_name)
            .map(|entry| Arc::clone(entry.value()));
        if let Some(generation) = static_generation {
            if let Some(response) = generation.get(key).await {
                debug!(key, generation = generation.name(), "Cache hit");
                return Some(response);
            }
        }

        let others: Vec<Arc<CacheGeneration>> = self
            .registry
            .iter()
            .filter(|entry| entry.key() != &self.static_name)
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        for generation in others {
            if let Some(response) = generation.get(key).await {
                debug!(key, generation = generation.name(), "Cache hit");
                return Some(response);
            }
        }
        None
    }

    /// Store a response in the dynamic generation, creating it on first use.
    pub async fn put_dynamic(&self, key: String, response: FetchResponse) {
        let generation = Arc::clone(
            self.registry
                .entry(self.dynamic_name.clone())
                .or_insert_with(|| {
                    Arc::new(CacheGeneration::new_dynamic(
                        self.dynamic_name.clone(),
                        &self.cache_config,
                    ))
                })
                .value(),
        );
        generation.insert(key, response).await;
    }

    /// Look up the cached app shell document for a navigation fallback.
    pub async fn match_shell(&self, origin: &url::Url) -> Option<FetchResponse> {
        match keys::shell_request_key(origin) {
            Ok(key) => self.match_request(&key).await,
            Err(e) => {
                warn!("Cannot derive shell cache key: {e}");
                None
            }
        }
    }

    /// Names of all live generations.
    pub fn generation_names(&self) -> Vec<String> {
        self.registry.iter().map(|entry| entry.key().clone()).collect()
    }

    /// The shared registry, for handing to a newer-version store.
    pub fn registry(&self) -> GenerationRegistry {
        Arc::clone(&self.registry)
    }

    /// Name of the current static generation.
    pub fn static_name(&self) -> &str {
        &self.static_name
    }

    /// Name of the current dynamic generation.
    pub fn dynamic_name(&self) -> &str {
        &self.dynamic_name
    }
}
