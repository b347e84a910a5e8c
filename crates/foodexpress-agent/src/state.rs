//! Worker state shared across all event handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use url::Url;

use foodexpress_cache::CacheStore;
use foodexpress_core::config::AppConfig;
use foodexpress_core::traits::clients::ClientWindows;
use foodexpress_core::traits::net::NetworkClient;
use foodexpress_fetch::RequestInterceptor;
use foodexpress_notify::NotificationGateway;
use foodexpress_sync::{PendingAlertQueue, SyncCoordinator};

/// Worker lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    /// No lifecycle event handled yet.
    Idle,
    /// Install completed; static cache is populated.
    Installed,
    /// Activate completed; this instance controls all clients.
    Active,
}

/// Shared dependencies for every event handler.
///
/// This is the explicit owner of what the original worker kept as
/// module-level globals: cache names live inside [`CacheStore`], pending
/// alerts in the durable queue, and lifecycle flags here. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct WorkerState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The app's own origin, for policy decisions and fallbacks.
    pub app_origin: Url,
    /// Cache generations (static shell + dynamic responses).
    pub cache: Arc<CacheStore>,
    /// Network client used for manifest installs.
    pub network: Arc<dyn NetworkClient>,
    /// Cache-first request interception.
    pub interceptor: Arc<RequestInterceptor>,
    /// Durable pending-alert queue.
    pub queue: Arc<PendingAlertQueue>,
    /// Alert delivery coordinator.
    pub coordinator: Arc<SyncCoordinator>,
    /// Push notification gateway.
    pub gateway: Arc<NotificationGateway>,
    /// Host window control.
    pub clients: Arc<dyn ClientWindows>,
    /// Set during install: activate immediately without waiting for
    /// existing clients to finish.
    pub skip_waiting: Arc<AtomicBool>,
    /// Current lifecycle phase.
    pub phase: Arc<RwLock<WorkerPhase>>,
}

impl WorkerState {
    /// Whether install requested immediate activation.
    pub fn skip_waiting_requested(&self) -> bool {
        self.skip_waiting.load(Ordering::SeqCst)
    }

    /// Current lifecycle phase.
    pub async fn phase(&self) -> WorkerPhase {
        *self.phase.read().await
    }
}
