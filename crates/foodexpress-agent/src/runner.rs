//! Worker runner — the sequential event loop.

use tokio::sync::{mpsc, watch};
use tracing::{error, info};

use foodexpress_core::events::WorkerEvent;

use crate::dispatcher::EventDispatcher;

/// Processes worker events one at a time until shutdown.
///
/// Handlers run to completion before the next event is taken, matching
/// the single-threaded, event-driven model of the hosting environment.
/// A handler error never kills the loop; it is logged and the loop moves
/// on, the way the original worker's top-level error handlers swallowed
/// failures.
///
/// Fetch events dispatched through the channel have their decision logged
/// and dropped; a host that needs the response calls
/// [`EventDispatcher::dispatch`] directly and awaits the outcome.
#[derive(Debug)]
pub struct WorkerRunner {
    dispatcher: EventDispatcher,
}

impl WorkerRunner {
    /// Create a runner over the given dispatcher.
    pub fn new(dispatcher: EventDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Run until the event channel closes or the cancel signal fires.
    pub async fn run(
        &self,
        mut events: mpsc::Receiver<WorkerEvent>,
        mut cancel: watch::Receiver<bool>,
    ) {
        info!("Worker event loop started");

        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        info!("Worker event loop received shutdown signal");
                        break;
                    }
                }
                maybe_event = events.recv() => {
                    match maybe_event {
                        Some(event) => {
                            let kind = event.kind();
                            if let Err(e) = self.dispatcher.dispatch(event).await {
                                error!(kind, "Worker event failed: {e}");
                            }
                        }
                        None => {
                            info!("Worker event channel closed");
                            break;
                        }
                    }
                }
            }
        }

        info!("Worker event loop stopped");
    }
}
