//! Push and notification interaction handlers.

use foodexpress_core::result::AppResult;
use foodexpress_core::types::notification::NotificationDescriptor;

use crate::state::WorkerState;

/// An inbound push event: display exactly one notification.
pub async fn on_push(state: &WorkerState, data: Option<&[u8]>) -> AppResult<()> {
    state.gateway.handle_push(data).await?;
    Ok(())
}

/// The user clicked a notification or one of its actions.
pub async fn on_click(
    state: &WorkerState,
    action: Option<&str>,
    notification: &NotificationDescriptor,
) -> AppResult<()> {
    state.gateway.handle_click(action, notification).await?;
    Ok(())
}

/// The user dismissed a notification; close-tracking is best-effort.
pub async fn on_close(state: &WorkerState, notification: &NotificationDescriptor) {
    state.gateway.handle_close(notification).await;
}
