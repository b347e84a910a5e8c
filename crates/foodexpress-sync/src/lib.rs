//! # foodexpress-sync
//!
//! The alert delivery pipeline:
//! - A durable, FIFO pending-alert queue that survives restarts
//! - An HTTP delivery transport posting alerts to the server
//! - A sync coordinator that reacts to connectivity-restored triggers and
//!   drains the queue with per-alert failure isolation

pub mod coordinator;
pub mod delivery;
pub mod pending;

pub use coordinator::{AlertDeliveryState, AlertStatusUpdate, SyncCoordinator};
pub use delivery::HttpDeliveryTransport;
pub use pending::{DrainReport, PendingAlertQueue};
