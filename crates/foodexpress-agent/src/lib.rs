//! # foodexpress-agent
//!
//! Ties the offline pipeline together: a single dispatcher routes every
//! worker event (install, activate, fetch, sync, push, notification
//! interaction, boundary messages) to its handler and awaits the handler
//! to completion before the event counts as handled.

pub mod app;
pub mod dispatcher;
pub mod handlers;
pub mod host;
pub mod runner;
pub mod state;

pub use app::{build_state, build_state_with, HostBindings};
pub use dispatcher::{EventDispatcher, EventOutcome};
pub use runner::WorkerRunner;
pub use state::{WorkerPhase, WorkerState};
