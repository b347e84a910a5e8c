//! Sync trigger and boundary message handlers.

use tracing::debug;

use foodexpress_core::events::ClientMessage;
use foodexpress_core::result::AppResult;

use crate::state::WorkerState;

/// A connectivity-restored trigger: drain the pending queue.
pub async fn on_sync(state: &WorkerState, tag: &str) {
    debug!(tag, "Background sync triggered");
    state.coordinator.sync(tag).await;
}

/// A message from the UI collaborator.
///
/// `online` is the environment's connectivity report, passed through to
/// the enqueue decision.
pub async fn on_message(
    state: &WorkerState,
    message: ClientMessage,
    online: bool,
) -> AppResult<()> {
    match message {
        ClientMessage::EmergencyAlert(payload) => {
            state.coordinator.accept(payload, online).await
        }
    }
}
