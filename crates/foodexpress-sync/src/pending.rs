//! Durable pending-alert queue.
//!
//! Each pending alert is one JSON file named by its id under the queue
//! directory. Alert ids are UUIDv7, so lexicographic file order equals
//! insertion order and the queue drains FIFO without an index file.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use foodexpress_core::error::{AppError, ErrorKind};
use foodexpress_core::result::AppResult;
use foodexpress_core::traits::delivery::DeliveryTransport;
use foodexpress_core::types::alert::AlertPayload;

/// Outcome of one drain pass, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Entries in the snapshot when the drain started.
    pub attempted: usize,
    /// Entries acknowledged and removed.
    pub delivered: usize,
    /// Entries that failed and stay queued.
    pub retained: usize,
}

/// Durable FIFO queue of alerts awaiting server acknowledgement.
///
/// Entries are created when an alert cannot be delivered immediately and
/// removed only on a confirmed acknowledgement; they are never silently
/// dropped. Drains are serialized, so an alert enqueued while a drain is
/// running is picked up by the next drain rather than lost.
#[derive(Debug)]
pub struct PendingAlertQueue {
    dir: PathBuf,
    drain_lock: Mutex<()>,
}

impl PendingAlertQueue {
    /// Open the queue rooted at the given directory, creating it if absent.
    pub async fn open(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create queue directory: {}", dir.display()),
                e,
            )
        })?;
        Ok(Self {
            dir,
            drain_lock: Mutex::new(()),
        })
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Append an alert to the queue, persisted before returning.
    pub async fn enqueue(&self, alert: &AlertPayload) -> AppResult<()> {
        let path = self.path_for(alert.id);
        let json = serde_json::to_vec(alert)?;
        fs::write(&path, &json).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to persist alert {}", alert.id),
                e,
            )
        })?;
        debug!(alert_id = %alert.id, urgency = alert.urgency.as_str(), "Alert queued for sync");
        Ok(())
    }

    /// Remove an acknowledged alert.
    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        let path = self.path_for(id);
        fs::remove_file(&path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to remove alert {id}"),
                e,
            )
        })?;
        debug!(alert_id = %id, "Removed pending alert");
        Ok(())
    }

    /// Load all pending alerts in FIFO order.
    ///
    /// A file that fails to parse is logged and skipped, never deleted.
    pub async fn load(&self) -> AppResult<Vec<AlertPayload>> {
        let mut paths = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read queue directory: {}", self.dir.display()),
                e,
            )
        })?;
        while let Some(entry) = entries.next_entry().await.map_err(AppError::from)? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut alerts = Vec::with_capacity(paths.len());
        for path in paths {
            match Self::read_alert(&path).await {
                Ok(alert) => alerts.push(alert),
                Err(e) => warn!(path = %path.display(), "Skipping unreadable pending alert: {e}"),
            }
        }
        Ok(alerts)
    }

    async fn read_alert(path: &Path) -> AppResult<AlertPayload> {
        let bytes = fs::read(path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Number of pending alerts.
    pub async fn len(&self) -> AppResult<usize> {
        Ok(self.load().await?.len())
    }

    /// Whether the queue is empty.
    pub async fn is_empty(&self) -> AppResult<bool> {
        Ok(self.len().await? == 0)
    }

    /// Drain the queue in FIFO order through the given transport.
    ///
    /// Per-entry isolation: an acknowledged alert is removed, a failed one
    /// is logged and retained, and the drain moves on to the next entry
    /// either way. Errors never propagate out of the drain. Only the
    /// entries present when the drain started are attempted; alerts
    /// enqueued mid-drain wait for the next trigger.
    pub async fn drain(&self, transport: &dyn DeliveryTransport) -> DrainReport {
        let _guard = self.drain_lock.lock().await;

        let snapshot = match self.load().await {
            Ok(alerts) => alerts,
            Err(e) => {
                error!("Failed to load pending alerts: {e}");
                return DrainReport::default();
            }
        };

        let mut report = DrainReport {
            attempted: snapshot.len(),
            ..DrainReport::default()
        };

        for alert in snapshot {
            match transport.deliver(&alert).await {
                Ok(()) => {
                    if let Err(e) = self.remove(alert.id).await {
                        error!(alert_id = %alert.id, "Delivered alert could not be removed: {e}");
                    }
                    info!(alert_id = %alert.id, "Emergency alert synced");
                    report.delivered += 1;
                }
                Err(e) => {
                    warn!(alert_id = %alert.id, "Failed to sync emergency alert: {e}");
                    report.retained += 1;
                }
            }
        }
        report
    }
}
