//! Worker state wiring.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use tokio::sync::RwLock;
use tracing::info;

use foodexpress_cache::CacheStore;
use foodexpress_core::config::AppConfig;
use foodexpress_core::result::AppResult;
use foodexpress_core::traits::clients::ClientWindows;
use foodexpress_core::traits::delivery::DeliveryTransport;
use foodexpress_core::traits::net::NetworkClient;
use foodexpress_core::traits::notify::NotificationSink;
use foodexpress_core::traits::registration::SyncRegistration;
use foodexpress_fetch::{ReqwestNetworkClient, RequestInterceptor};
use foodexpress_notify::{AnalyticsSink, HttpAnalytics, NotificationGateway};
use foodexpress_sync::{HttpDeliveryTransport, PendingAlertQueue, SyncCoordinator};

use crate::host::{LoggingClientWindows, LoggingNotificationSink, TaggedSyncRegistry};
use crate::state::{WorkerPhase, WorkerState};

/// Environment-facing implementations the worker is wired against.
///
/// The standalone binary uses HTTP transports and logging host stubs;
/// tests substitute mocks.
pub struct HostBindings {
    pub network: Arc<dyn NetworkClient>,
    pub delivery: Arc<dyn DeliveryTransport>,
    pub registration: Arc<dyn SyncRegistration>,
    pub clients: Arc<dyn ClientWindows>,
    pub notifications: Arc<dyn NotificationSink>,
    pub analytics: Arc<dyn AnalyticsSink>,
}

/// Build the worker state with the default HTTP/host bindings.
pub async fn build_state(config: AppConfig) -> AppResult<WorkerState> {
    let origin = config.shell.origin_url()?;
    let delivery_endpoint = origin.join(&config.sync.delivery_path)?;
    let analytics_endpoint = origin.join(&config.notifications.analytics_path)?;

    let bindings = HostBindings {
        network: Arc::new(ReqwestNetworkClient::new(origin)),
        delivery: Arc::new(HttpDeliveryTransport::new(delivery_endpoint)),
        registration: Arc::new(TaggedSyncRegistry::new()),
        clients: Arc::new(LoggingClientWindows),
        notifications: Arc::new(LoggingNotificationSink),
        analytics: Arc::new(HttpAnalytics::new(analytics_endpoint)),
    };
    build_state_with(config, bindings).await
}

/// Build the worker state over explicit host bindings.
pub async fn build_state_with(
    config: AppConfig,
    bindings: HostBindings,
) -> AppResult<WorkerState> {
    let app_origin = config.shell.origin_url()?;

    // ── Step 1: Cache generations ────────────────────────────────
    let cache = Arc::new(CacheStore::new(&config.shell, &config.cache)?);

    // ── Step 2: Request interception ─────────────────────────────
    let interceptor = Arc::new(RequestInterceptor::new(
        Arc::clone(&cache),
        Arc::clone(&bindings.network),
        app_origin.clone(),
    ));

    // ── Step 3: Durable pending-alert queue ──────────────────────
    let queue = Arc::new(PendingAlertQueue::open(config.sync.data_dir.as_str()).await?);
    info!(dir = %config.sync.data_dir, "Pending-alert queue ready");

    // ── Step 4: Sync coordinator ─────────────────────────────────
    let coordinator = Arc::new(SyncCoordinator::new(
        Arc::clone(&queue),
        Arc::clone(&bindings.delivery),
        Arc::clone(&bindings.registration),
        config.sync.tag.clone(),
    ));

    // ── Step 5: Notification gateway ─────────────────────────────
    let gateway = Arc::new(NotificationGateway::new(
        Arc::clone(&bindings.notifications),
        Arc::clone(&bindings.clients),
        Arc::clone(&bindings.analytics),
        config.notifications.clone(),
    ));

    Ok(WorkerState {
        config: Arc::new(config),
        app_origin,
        cache,
        network: bindings.network,
        interceptor,
        queue,
        coordinator,
        gateway,
        clients: bindings.clients,
        skip_waiting: Arc::new(AtomicBool::new(false)),
        phase: Arc::new(RwLock::new(WorkerPhase::Idle)),
    })
}
