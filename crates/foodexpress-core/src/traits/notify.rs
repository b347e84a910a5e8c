//! Notification display trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::notification::NotificationDescriptor;

/// Displays notifications to the user.
#[async_trait]
pub trait NotificationSink: Send + Sync + std::fmt::Debug + 'static {
    /// Display one notification.
    async fn show(&self, descriptor: &NotificationDescriptor) -> AppResult<()>;
}
