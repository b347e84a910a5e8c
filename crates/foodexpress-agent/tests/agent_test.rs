//! End-to-end tests for the worker event pipeline.

use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use url::Url;

use foodexpress_agent::host::TaggedSyncRegistry;
use foodexpress_agent::{
    EventDispatcher, EventOutcome, HostBindings, WorkerPhase, WorkerRunner, build_state_with,
};
use foodexpress_core::config::AppConfig;
use foodexpress_core::error::AppError;
use foodexpress_core::events::{ClientMessage, WorkerEvent};
use foodexpress_core::result::AppResult;
use foodexpress_core::traits::clients::ClientWindows;
use foodexpress_core::traits::delivery::DeliveryTransport;
use foodexpress_core::traits::net::NetworkClient;
use foodexpress_core::traits::notify::NotificationSink;
use foodexpress_core::types::alert::{AlertPayload, Incident, LocationShare};
use foodexpress_core::types::http::{FetchRequest, FetchResponse, ResponseKind};
use foodexpress_core::types::notification::NotificationDescriptor;
use foodexpress_fetch::FetchDecision;
use foodexpress_notify::AnalyticsSink;

/// Network that serves every URL until switched offline.
#[derive(Debug, Default)]
struct SwitchableNetwork {
    offline: AtomicBool,
}

#[async_trait]
impl NetworkClient for SwitchableNetwork {
    async fn fetch(&self, request: &FetchRequest) -> AppResult<FetchResponse> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::network("no connectivity"));
        }
        Ok(FetchResponse::new(
            StatusCode::OK,
            Some("text/html".to_string()),
            Bytes::from(format!("body of {}", request.url)),
            ResponseKind::Basic,
        ))
    }
}

/// Delivery endpoint that can be switched between accepting and failing.
#[derive(Debug, Default)]
struct SwitchableDelivery {
    failing: AtomicBool,
    delivered: AtomicUsize,
}

#[async_trait]
impl DeliveryTransport for SwitchableDelivery {
    async fn deliver(&self, _alert: &AlertPayload) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::delivery("endpoint returned 502"));
        }
        self.delivered.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct RecordingSink {
    shown: StdMutex<Vec<NotificationDescriptor>>,
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn show(&self, descriptor: &NotificationDescriptor) -> AppResult<()> {
        self.shown.lock().unwrap().push(descriptor.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct QuietClients {
    claimed: AtomicBool,
}

#[async_trait]
impl ClientWindows for QuietClients {
    async fn claim(&self) -> AppResult<()> {
        self.claimed.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn focus_existing(&self) -> AppResult<bool> {
        Ok(false)
    }

    async fn open_window(&self, _url: &str) -> AppResult<()> {
        Ok(())
    }

    async fn open_dialer(&self, _tel_url: &str) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct NullAnalytics;

#[async_trait]
impl AnalyticsSink for NullAnalytics {
    async fn notification_closed(&self, _notification_id: Option<&str>) -> AppResult<()> {
        Ok(())
    }
}

struct Harness {
    dispatcher: EventDispatcher,
    network: Arc<SwitchableNetwork>,
    delivery: Arc<SwitchableDelivery>,
    registration: Arc<TaggedSyncRegistry>,
    sink: Arc<RecordingSink>,
    clients: Arc<QuietClients>,
    _dir: tempfile::TempDir,
}

async fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.sync.data_dir = dir.path().join("pending").display().to_string();

    let network = Arc::new(SwitchableNetwork::default());
    let delivery = Arc::new(SwitchableDelivery::default());
    let registration = Arc::new(TaggedSyncRegistry::new());
    let sink = Arc::new(RecordingSink::default());
    let clients = Arc::new(QuietClients::default());

    let bindings = HostBindings {
        network: Arc::clone(&network) as Arc<dyn NetworkClient>,
        delivery: Arc::clone(&delivery) as Arc<dyn DeliveryTransport>,
        registration: Arc::clone(&registration) as Arc<dyn foodexpress_core::traits::registration::SyncRegistration>,
        clients: Arc::clone(&clients) as Arc<dyn ClientWindows>,
        notifications: Arc::clone(&sink) as Arc<dyn NotificationSink>,
        analytics: Arc::new(NullAnalytics) as Arc<dyn AnalyticsSink>,
    };

    let state = build_state_with(config, bindings).await.unwrap();
    Harness {
        dispatcher: EventDispatcher::new(state),
        network,
        delivery,
        registration,
        sink,
        clients,
        _dir: dir,
    }
}

fn alert() -> AlertPayload {
    AlertPayload::new(
        vec![Incident::new("immediate-danger", "Perigo imediato", "")],
        None,
        LocationShare::NotShared,
        vec![],
    )
}

fn origin() -> Url {
    Url::parse("http://localhost:8080").unwrap()
}

#[tokio::test]
async fn test_install_then_activate() {
    let hx = harness().await;

    hx.dispatcher.dispatch(WorkerEvent::Install).await.unwrap();
    assert_eq!(hx.dispatcher.state().phase().await, WorkerPhase::Installed);
    assert!(hx.dispatcher.state().skip_waiting_requested());

    hx.dispatcher.dispatch(WorkerEvent::Activate).await.unwrap();
    assert_eq!(hx.dispatcher.state().phase().await, WorkerPhase::Active);
    assert!(hx.clients.claimed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_offline_navigation_serves_cached_shell() {
    let hx = harness().await;
    hx.dispatcher.dispatch(WorkerEvent::Install).await.unwrap();
    hx.dispatcher.dispatch(WorkerEvent::Activate).await.unwrap();

    hx.network.offline.store(true, Ordering::SeqCst);
    let request = FetchRequest::navigate(origin().join("/menu").unwrap());
    let outcome = hx
        .dispatcher
        .dispatch(WorkerEvent::Fetch(request))
        .await
        .unwrap();

    match outcome {
        EventOutcome::Fetch(FetchDecision::Respond(response)) => {
            assert_eq!(response.status, StatusCode::OK);
            assert_eq!(
                response.body,
                Bytes::from("body of http://localhost:8080/index.html")
            );
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_offline_alert_is_queued_then_synced() {
    let hx = harness().await;
    let sent = alert();

    // Offline: the alert lands in the durable queue and a sync is
    // registered.
    let message = WorkerEvent::Message {
        message: ClientMessage::EmergencyAlert(sent.clone()),
        online: false,
    };
    hx.dispatcher.dispatch(message).await.unwrap();

    let state = hx.dispatcher.state();
    assert_eq!(state.queue.len().await.unwrap(), 1);
    assert_eq!(
        hx.registration.pending(),
        vec!["emergency-alert-sync".to_string()]
    );
    assert_eq!(hx.delivery.delivered.load(Ordering::SeqCst), 0);

    // Connectivity returns: the sync trigger drains the queue.
    hx.dispatcher
        .dispatch(WorkerEvent::Sync {
            tag: "emergency-alert-sync".to_string(),
        })
        .await
        .unwrap();

    assert!(state.queue.is_empty().await.unwrap());
    assert_eq!(hx.delivery.delivered.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_sync_keeps_alert_for_next_trigger() {
    let hx = harness().await;
    hx.dispatcher
        .dispatch(WorkerEvent::Message {
            message: ClientMessage::EmergencyAlert(alert()),
            online: false,
        })
        .await
        .unwrap();

    hx.delivery.failing.store(true, Ordering::SeqCst);
    hx.dispatcher
        .dispatch(WorkerEvent::Sync {
            tag: "emergency-alert-sync".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(hx.dispatcher.state().queue.len().await.unwrap(), 1);

    hx.delivery.failing.store(false, Ordering::SeqCst);
    hx.dispatcher
        .dispatch(WorkerEvent::Sync {
            tag: "emergency-alert-sync".to_string(),
        })
        .await
        .unwrap();
    assert!(hx.dispatcher.state().queue.is_empty().await.unwrap());
}

#[tokio::test]
async fn test_online_alert_skips_queue() {
    let hx = harness().await;
    hx.dispatcher
        .dispatch(WorkerEvent::Message {
            message: ClientMessage::EmergencyAlert(alert()),
            online: true,
        })
        .await
        .unwrap();

    assert!(hx.dispatcher.state().queue.is_empty().await.unwrap());
    assert_eq!(hx.delivery.delivered.load(Ordering::SeqCst), 1);
    assert!(hx.registration.pending().is_empty());
}

#[tokio::test]
async fn test_emergency_push_displays_forced_interaction() {
    let hx = harness().await;
    let body = Bytes::from(r#"{"type":"emergency-response","title":"Central respondeu"}"#);

    hx.dispatcher
        .dispatch(WorkerEvent::Push { data: Some(body) })
        .await
        .unwrap();

    let shown = hx.sink.shown.lock().unwrap();
    assert_eq!(shown.len(), 1);
    assert!(shown[0].require_interaction);
    assert_eq!(shown[0].title, "Central respondeu");
}

#[tokio::test]
async fn test_runner_processes_events_until_shutdown() {
    let hx = harness().await;
    let (event_tx, event_rx) = tokio::sync::mpsc::channel(16);
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let runner = WorkerRunner::new(hx.dispatcher.clone());
    let state = hx.dispatcher.state().clone();
    let handle = tokio::spawn(async move {
        runner.run(event_rx, shutdown_rx).await;
    });

    event_tx
        .send(WorkerEvent::Message {
            message: ClientMessage::EmergencyAlert(alert()),
            online: false,
        })
        .await
        .unwrap();
    event_tx
        .send(WorkerEvent::Sync {
            tag: "emergency-alert-sync".to_string(),
        })
        .await
        .unwrap();

    // Give the loop a moment to process both events in order.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(state.queue.is_empty().await.unwrap());
    assert_eq!(hx.delivery.delivered.load(Ordering::SeqCst), 1);

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();
}
