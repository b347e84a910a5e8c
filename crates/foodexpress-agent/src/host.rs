//! Default host bindings for running outside a real client environment.

use async_trait::async_trait;
use dashmap::DashSet;
use tracing::{debug, info};

use foodexpress_core::result::AppResult;
use foodexpress_core::traits::clients::ClientWindows;
use foodexpress_core::traits::notify::NotificationSink;
use foodexpress_core::traits::registration::SyncRegistration;
use foodexpress_core::types::notification::NotificationDescriptor;

/// Window control that logs every request.
///
/// The standalone worker binary has no real windows to drive; an
/// embedding host replaces this with its own bridge.
#[derive(Debug, Default)]
pub struct LoggingClientWindows;

#[async_trait]
impl ClientWindows for LoggingClientWindows {
    async fn claim(&self) -> AppResult<()> {
        info!("Claimed all open clients");
        Ok(())
    }

    async fn focus_existing(&self) -> AppResult<bool> {
        debug!("No window registry available; nothing to focus");
        Ok(false)
    }

    async fn open_window(&self, url: &str) -> AppResult<()> {
        info!(url, "Open window requested");
        Ok(())
    }

    async fn open_dialer(&self, tel_url: &str) -> AppResult<()> {
        info!(tel_url, "Dialer requested");
        Ok(())
    }
}

/// Notification sink that logs displayed notifications.
#[derive(Debug, Default)]
pub struct LoggingNotificationSink;

#[async_trait]
impl NotificationSink for LoggingNotificationSink {
    async fn show(&self, descriptor: &NotificationDescriptor) -> AppResult<()> {
        info!(
            title = %descriptor.title,
            tag = %descriptor.tag,
            require_interaction = descriptor.require_interaction,
            "Displaying notification"
        );
        Ok(())
    }
}

/// Records sync tags requested while offline so the host can fire the
/// matching sync events once it observes connectivity again.
#[derive(Debug, Default)]
pub struct TaggedSyncRegistry {
    tags: DashSet<String>,
}

impl TaggedSyncRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags currently awaiting a sync trigger.
    pub fn pending(&self) -> Vec<String> {
        self.tags.iter().map(|tag| tag.key().clone()).collect()
    }

    /// Clear a tag once its sync trigger fired.
    pub fn clear(&self, tag: &str) {
        self.tags.remove(tag);
    }
}

#[async_trait]
impl SyncRegistration for TaggedSyncRegistry {
    async fn register(&self, tag: &str) -> AppResult<()> {
        self.tags.insert(tag.to_string());
        debug!(tag, "Registered background sync");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_registry_records_and_clears_tags() {
        let registry = TaggedSyncRegistry::new();
        registry.register("emergency-alert-sync").await.unwrap();
        registry.register("emergency-alert-sync").await.unwrap();
        assert_eq!(registry.pending(), vec!["emergency-alert-sync".to_string()]);

        registry.clear("emergency-alert-sync");
        assert!(registry.pending().is_empty());
    }
}
