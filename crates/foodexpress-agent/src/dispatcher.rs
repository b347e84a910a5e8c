//! Single dispatcher for all worker events.

use tracing::debug;

use foodexpress_core::events::WorkerEvent;
use foodexpress_core::result::AppResult;
use foodexpress_fetch::FetchDecision;

use crate::handlers;
use crate::state::WorkerState;

/// What dispatching one event produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event was handled; any side effects have completed.
    Handled,
    /// The fetch decision for an intercepted request.
    Fetch(FetchDecision),
}

/// Routes each [`WorkerEvent`] to its handler.
///
/// Every branch is awaited to completion before `dispatch` returns, so
/// the hosting environment can keep the worker alive for exactly the
/// duration of the event.
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    state: WorkerState,
}

impl EventDispatcher {
    /// Create a dispatcher over the given state.
    pub fn new(state: WorkerState) -> Self {
        Self { state }
    }

    /// The worker state this dispatcher operates on.
    pub fn state(&self) -> &WorkerState {
        &self.state
    }

    /// Dispatch one event.
    pub async fn dispatch(&self, event: WorkerEvent) -> AppResult<EventOutcome> {
        debug!(kind = event.kind(), "Dispatching worker event");

        match event {
            WorkerEvent::Install => {
                handlers::lifecycle::install(&self.state).await?;
                Ok(EventOutcome::Handled)
            }
            WorkerEvent::Activate => {
                handlers::lifecycle::activate(&self.state).await?;
                Ok(EventOutcome::Handled)
            }
            WorkerEvent::Fetch(request) => {
                let decision = handlers::fetch::intercept(&self.state, &request).await;
                Ok(EventOutcome::Fetch(decision))
            }
            WorkerEvent::Sync { tag } => {
                handlers::sync::on_sync(&self.state, &tag).await;
                Ok(EventOutcome::Handled)
            }
            WorkerEvent::Push { data } => {
                handlers::push::on_push(&self.state, data.as_deref()).await?;
                Ok(EventOutcome::Handled)
            }
            WorkerEvent::NotificationClick {
                action,
                notification,
            } => {
                handlers::push::on_click(&self.state, action.as_deref(), &notification).await?;
                Ok(EventOutcome::Handled)
            }
            WorkerEvent::NotificationClose { notification } => {
                handlers::push::on_close(&self.state, &notification).await;
                Ok(EventOutcome::Handled)
            }
            WorkerEvent::Message { message, online } => {
                handlers::sync::on_message(&self.state, message, online).await?;
                Ok(EventOutcome::Handled)
            }
        }
    }
}
