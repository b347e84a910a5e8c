//! Install and activate handlers.

use std::sync::atomic::Ordering;

use tracing::{error, info};

use foodexpress_core::result::AppResult;

use crate::state::{WorkerPhase, WorkerState};

/// Install: populate the static cache from the manifest, all-or-nothing,
/// and request immediate activation.
///
/// On failure the previous worker instance keeps serving; the error is
/// logged by the caller and no generation is published.
pub async fn install(state: &WorkerState) -> AppResult<()> {
    info!("Service worker installing...");

    if let Err(e) = state.cache.install(state.network.as_ref()).await {
        error!("Failed to cache static files: {e}");
        return Err(e);
    }

    // Become the active worker without waiting for existing clients.
    state.skip_waiting.store(true, Ordering::SeqCst);
    *state.phase.write().await = WorkerPhase::Installed;
    Ok(())
}

/// Activate: purge every generation from previous versions and claim all
/// open clients immediately.
pub async fn activate(state: &WorkerState) -> AppResult<()> {
    info!("Service worker activating...");

    let purged = state.cache.activate();
    if !purged.is_empty() {
        info!(count = purged.len(), ?purged, "Deleted old caches");
    }

    state.clients.claim().await?;
    *state.phase.write().await = WorkerPhase::Active;
    Ok(())
}
