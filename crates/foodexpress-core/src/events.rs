//! Worker events consumed by the agent dispatcher.
//!
//! Every interaction with the hosting environment arrives as one
//! [`WorkerEvent`]. The dispatcher awaits each event's handler to
//! completion before the event counts as handled, which is what keeps
//! lifecycle work alive for the duration of the event.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::types::alert::AlertPayload;
use crate::types::http::FetchRequest;
use crate::types::notification::NotificationDescriptor;

/// One event from the hosting environment.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    /// The agent is being installed: populate the static cache.
    Install,
    /// The agent is being activated: purge stale cache generations.
    Activate,
    /// An outgoing request was intercepted.
    Fetch(FetchRequest),
    /// Connectivity was restored; queued work tagged `tag` should retry.
    Sync { tag: String },
    /// An inbound push message, with its raw body if any.
    Push { data: Option<Bytes> },
    /// The user clicked a displayed notification.
    NotificationClick {
        /// The action button id, or `None` for a click on the body.
        action: Option<String>,
        notification: NotificationDescriptor,
    },
    /// The user dismissed a displayed notification.
    NotificationClose { notification: NotificationDescriptor },
    /// A message from the UI collaborator over the boundary channel.
    ///
    /// `online` is the environment's connectivity report at the moment the
    /// message was posted, passed explicitly so the enqueue decision does
    /// not depend on ambient state.
    Message { message: ClientMessage, online: bool },
}

impl WorkerEvent {
    /// Event kind label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Activate => "activate",
            Self::Fetch(_) => "fetch",
            Self::Sync { .. } => "sync",
            Self::Push { .. } => "push",
            Self::NotificationClick { .. } => "notificationclick",
            Self::NotificationClose { .. } => "notificationclose",
            Self::Message { .. } => "message",
        }
    }
}

/// Messages posted by the UI collaborator.
///
/// Wire format: `{"type": "EMERGENCY_ALERT", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    /// The user composed and sent an emergency alert.
    EmergencyAlert(AlertPayload),
}
