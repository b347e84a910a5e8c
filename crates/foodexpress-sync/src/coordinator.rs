//! Sync coordinator — owns the alert delivery lifecycle.
//!
//! Lifecycle per alert: `Created → SentDirect` when delivered immediately
//! while online, or `Created → Queued → Attempting → Sent` through the
//! background-sync path, falling back to `Queued` after a failed attempt.
//! There is no retry cap: every future sync trigger retries whatever is
//! still queued.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

use foodexpress_core::result::AppResult;
use foodexpress_core::traits::delivery::DeliveryTransport;
use foodexpress_core::traits::registration::SyncRegistration;
use foodexpress_core::types::alert::AlertPayload;

use crate::pending::{DrainReport, PendingAlertQueue};

/// Where an alert is in its delivery lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertDeliveryState {
    /// Accepted from the UI collaborator.
    Created,
    /// Delivered immediately while online.
    SentDirect,
    /// Persisted in the pending queue, awaiting a sync trigger.
    Queued,
    /// A sync pass is attempting delivery.
    Attempting,
    /// Acknowledged by the server during a sync pass.
    Sent,
}

/// Status update published to the UI collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertStatusUpdate {
    pub alert_id: Uuid,
    pub state: AlertDeliveryState,
}

/// Reacts to sync triggers by draining the pending queue, and accepts
/// fresh alerts from the boundary channel.
#[derive(Debug)]
pub struct SyncCoordinator {
    queue: Arc<PendingAlertQueue>,
    transport: Arc<dyn DeliveryTransport>,
    registration: Arc<dyn SyncRegistration>,
    tag: String,
    events: broadcast::Sender<AlertStatusUpdate>,
}

impl SyncCoordinator {
    /// Create a coordinator draining `queue` through `transport` whenever
    /// a sync trigger tagged `tag` arrives.
    pub fn new(
        queue: Arc<PendingAlertQueue>,
        transport: Arc<dyn DeliveryTransport>,
        registration: Arc<dyn SyncRegistration>,
        tag: impl Into<String>,
    ) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            queue,
            transport,
            registration,
            tag: tag.into(),
            events,
        }
    }

    /// Subscribe to alert status updates.
    pub fn subscribe(&self) -> broadcast::Receiver<AlertStatusUpdate> {
        self.events.subscribe()
    }

    fn publish(&self, alert_id: Uuid, state: AlertDeliveryState) {
        // Nobody listening is fine; updates are best-effort reporting.
        let _ = self.events.send(AlertStatusUpdate { alert_id, state });
    }

    /// Accept an alert from the boundary channel.
    ///
    /// `online` is the environment's connectivity report: when online the
    /// alert is delivered immediately; when offline (or when the direct
    /// attempt fails) it is enqueued and a sync registration is requested.
    /// Registration failure is logged and does not affect the queue.
    pub async fn accept(&self, alert: AlertPayload, online: bool) -> AppResult<()> {
        self.publish(alert.id, AlertDeliveryState::Created);

        if online {
            match self.transport.deliver(&alert).await {
                Ok(()) => {
                    info!(alert_id = %alert.id, "Emergency alert delivered directly");
                    self.publish(alert.id, AlertDeliveryState::SentDirect);
                    return Ok(());
                }
                Err(e) => {
                    warn!(alert_id = %alert.id, "Direct delivery failed, queueing: {e}");
                }
            }
        }

        self.queue.enqueue(&alert).await?;
        self.publish(alert.id, AlertDeliveryState::Queued);

        if let Err(e) = self.registration.register(&self.tag).await {
            warn!("Failed to register background sync: {e}");
        }
        Ok(())
    }

    /// Handle a sync trigger. Triggers with a foreign tag are ignored.
    pub async fn sync(&self, tag: &str) -> DrainReport {
        if tag != self.tag {
            debug!(tag, "Ignoring sync trigger with unknown tag");
            return DrainReport::default();
        }

        let reporting = ReportingTransport {
            inner: Arc::clone(&self.transport),
            events: self.events.clone(),
        };
        let report = self.queue.drain(&reporting).await;
        info!(
            attempted = report.attempted,
            delivered = report.delivered,
            retained = report.retained,
            "Alert sync pass complete"
        );
        report
    }

    /// The sync tag this coordinator reacts to.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// Decorator that publishes per-alert status transitions around the real
/// transport during a drain.
#[derive(Debug)]
struct ReportingTransport {
    inner: Arc<dyn DeliveryTransport>,
    events: broadcast::Sender<AlertStatusUpdate>,
}

#[async_trait]
impl DeliveryTransport for ReportingTransport {
    async fn deliver(&self, alert: &AlertPayload) -> AppResult<()> {
        let _ = self.events.send(AlertStatusUpdate {
            alert_id: alert.id,
            state: AlertDeliveryState::Attempting,
        });
        let result = self.inner.deliver(alert).await;
        let state = match &result {
            Ok(()) => AlertDeliveryState::Sent,
            Err(_) => AlertDeliveryState::Queued,
        };
        let _ = self.events.send(AlertStatusUpdate {
            alert_id: alert.id,
            state,
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use foodexpress_core::error::AppError;
    use foodexpress_core::types::alert::{Incident, LocationShare};

    const TAG: &str = "emergency-alert-sync";

    fn alert(note: &str) -> AlertPayload {
        AlertPayload::new(
            vec![Incident::new("harassment", "Assédio", "")],
            Some(note.to_string()),
            LocationShare::NotShared,
            vec![],
        )
    }

    #[derive(Debug, Default)]
    struct FlakyTransport {
        fail: AtomicBool,
        deliveries: AtomicUsize,
    }

    #[async_trait]
    impl DeliveryTransport for FlakyTransport {
        async fn deliver(&self, _alert: &AlertPayload) -> AppResult<()> {
            if self.fail.load(Ordering::SeqCst) {
                Err(AppError::delivery("endpoint unreachable"))
            } else {
                self.deliveries.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }
    }

    #[derive(Debug, Default)]
    struct RecordingRegistration {
        tags: StdMutex<Vec<String>>,
        fail: AtomicBool,
    }

    #[async_trait]
    impl SyncRegistration for RecordingRegistration {
        async fn register(&self, tag: &str) -> AppResult<()> {
            self.tags.lock().unwrap().push(tag.to_string());
            if self.fail.load(Ordering::SeqCst) {
                Err(AppError::registration("host refused registration"))
            } else {
                Ok(())
            }
        }
    }

    struct Fixture {
        coordinator: SyncCoordinator,
        queue: Arc<PendingAlertQueue>,
        transport: Arc<FlakyTransport>,
        registration: Arc<RecordingRegistration>,
        _dir: tempfile::TempDir,
    }

    async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let queue = Arc::new(PendingAlertQueue::open(dir.path()).await.unwrap());
        let transport = Arc::new(FlakyTransport::default());
        let registration = Arc::new(RecordingRegistration::default());
        let coordinator = SyncCoordinator::new(
            Arc::clone(&queue),
            Arc::clone(&transport) as Arc<dyn DeliveryTransport>,
            Arc::clone(&registration) as Arc<dyn SyncRegistration>,
            TAG,
        );
        Fixture {
            coordinator,
            queue,
            transport,
            registration,
            _dir: dir,
        }
    }

    fn drain_states(rx: &mut broadcast::Receiver<AlertStatusUpdate>) -> Vec<AlertDeliveryState> {
        let mut states = Vec::new();
        while let Ok(update) = rx.try_recv() {
            states.push(update.state);
        }
        states
    }

    #[tokio::test]
    async fn test_online_accept_delivers_directly() {
        let fx = fixture().await;
        let mut rx = fx.coordinator.subscribe();

        fx.coordinator.accept(alert("a"), true).await.unwrap();

        assert!(fx.queue.is_empty().await.unwrap());
        assert_eq!(fx.transport.deliveries.load(Ordering::SeqCst), 1);
        assert_eq!(
            drain_states(&mut rx),
            vec![AlertDeliveryState::Created, AlertDeliveryState::SentDirect]
        );
        // No sync registration needed for a direct send.
        assert!(fx.registration.tags.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_offline_accept_queues_and_registers() {
        let fx = fixture().await;
        let mut rx = fx.coordinator.subscribe();

        fx.coordinator.accept(alert("a"), false).await.unwrap();

        assert_eq!(fx.queue.len().await.unwrap(), 1);
        assert_eq!(fx.transport.deliveries.load(Ordering::SeqCst), 0);
        assert_eq!(fx.registration.tags.lock().unwrap().as_slice(), [TAG]);
        assert_eq!(
            drain_states(&mut rx),
            vec![AlertDeliveryState::Created, AlertDeliveryState::Queued]
        );
    }

    #[tokio::test]
    async fn test_failed_direct_delivery_falls_back_to_queue() {
        let fx = fixture().await;
        fx.transport.fail.store(true, Ordering::SeqCst);

        fx.coordinator.accept(alert("a"), true).await.unwrap();

        assert_eq!(fx.queue.len().await.unwrap(), 1);
        assert_eq!(fx.registration.tags.lock().unwrap().as_slice(), [TAG]);
    }

    #[tokio::test]
    async fn test_registration_failure_keeps_alert_queued() {
        let fx = fixture().await;
        fx.registration.fail.store(true, Ordering::SeqCst);

        fx.coordinator.accept(alert("a"), false).await.unwrap();

        assert_eq!(fx.queue.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sync_drains_queue_and_reports_states() {
        let fx = fixture().await;
        fx.coordinator.accept(alert("a"), false).await.unwrap();
        let mut rx = fx.coordinator.subscribe();

        let report = fx.coordinator.sync(TAG).await;

        assert_eq!(report.delivered, 1);
        assert!(fx.queue.is_empty().await.unwrap());
        assert_eq!(
            drain_states(&mut rx),
            vec![AlertDeliveryState::Attempting, AlertDeliveryState::Sent]
        );
    }

    #[tokio::test]
    async fn test_sync_with_foreign_tag_is_ignored() {
        let fx = fixture().await;
        fx.coordinator.accept(alert("a"), false).await.unwrap();

        let report = fx.coordinator.sync("some-other-sync").await;

        assert_eq!(report, DrainReport::default());
        assert_eq!(fx.queue.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failed_sync_retries_on_next_trigger() {
        let fx = fixture().await;
        fx.coordinator.accept(alert("a"), false).await.unwrap();

        fx.transport.fail.store(true, Ordering::SeqCst);
        let first = fx.coordinator.sync(TAG).await;
        assert_eq!(first.retained, 1);
        assert_eq!(fx.queue.len().await.unwrap(), 1);

        fx.transport.fail.store(false, Ordering::SeqCst);
        let second = fx.coordinator.sync(TAG).await;
        assert_eq!(second.delivered, 1);
        assert!(fx.queue.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_alert_enqueued_mid_drain_waits_for_next_pass() {
        let fx = fixture().await;
        fx.coordinator.accept(alert("first"), false).await.unwrap();

        // Enqueue a second alert while the drain holds its snapshot by
        // delivering through a transport that enqueues on first use.
        #[derive(Debug)]
        struct EnqueueDuringDeliver {
            queue: Arc<PendingAlertQueue>,
            injected: AtomicBool,
            extra: StdMutex<Option<AlertPayload>>,
        }

        #[async_trait]
        impl DeliveryTransport for EnqueueDuringDeliver {
            async fn deliver(&self, _alert: &AlertPayload) -> AppResult<()> {
                if !self.injected.swap(true, Ordering::SeqCst) {
                    let extra = self.extra.lock().unwrap().take().unwrap();
                    self.queue.enqueue(&extra).await.unwrap();
                }
                Ok(())
            }
        }

        let transport = EnqueueDuringDeliver {
            queue: Arc::clone(&fx.queue),
            injected: AtomicBool::new(false),
            extra: StdMutex::new(Some(alert("late"))),
        };

        let report = fx.queue.drain(&transport).await;
        // Only the snapshot entry was attempted; the late alert waits.
        assert_eq!(report.attempted, 1);
        assert_eq!(fx.queue.len().await.unwrap(), 1);

        let second = fx.queue.drain(&transport).await;
        assert_eq!(second.delivered, 1);
        assert!(fx.queue.is_empty().await.unwrap());
    }
}
