//! Notification gateway — push events in, app actions out.

use std::sync::Arc;

use tracing::{error, info};

use foodexpress_core::config::notifications::NotificationsConfig;
use foodexpress_core::result::AppResult;
use foodexpress_core::traits::clients::ClientWindows;
use foodexpress_core::traits::notify::NotificationSink;
use foodexpress_core::types::notification::{
    NotificationAction, NotificationDescriptor, PushPayload,
};

use crate::analytics::AnalyticsSink;

/// Action id for opening the app at the alert details.
pub const ACTION_VIEW: &str = "view";
/// Action id for dialing the number carried in the notification data.
pub const ACTION_CALL: &str = "call";

/// What a notification click resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The system dialer was opened with a `tel:` URL.
    Dialed(String),
    /// An already-open app window was focused.
    FocusedExisting,
    /// A new app window was opened.
    OpenedWindow(String),
    /// The action had no mapping; nothing happened.
    Ignored,
}

/// Handles inbound push events and user interaction with displayed
/// notifications, decoupled from the alert send path.
#[derive(Debug)]
pub struct NotificationGateway {
    sink: Arc<dyn NotificationSink>,
    clients: Arc<dyn ClientWindows>,
    analytics: Arc<dyn AnalyticsSink>,
    config: NotificationsConfig,
}

impl NotificationGateway {
    /// Create a gateway over the given display sink, window control, and
    /// analytics reporter.
    pub fn new(
        sink: Arc<dyn NotificationSink>,
        clients: Arc<dyn ClientWindows>,
        analytics: Arc<dyn AnalyticsSink>,
        config: NotificationsConfig,
    ) -> Self {
        Self {
            sink,
            clients,
            analytics,
            config,
        }
    }

    /// Handle one inbound push event: build the descriptor and display
    /// exactly one notification.
    ///
    /// A missing or malformed body falls back to the default descriptor.
    /// An emergency response forces required interaction and attaches the
    /// view/call actions.
    pub async fn handle_push(&self, body: Option<&[u8]>) -> AppResult<NotificationDescriptor> {
        let mut descriptor = NotificationDescriptor::default_from(&self.config);

        if let Some(bytes) = body {
            match serde_json::from_slice::<PushPayload>(bytes) {
                Ok(payload) => {
                    descriptor.apply(&payload);
                    if payload.is_emergency_response() {
                        descriptor.require_interaction = true;
                        descriptor.actions = vec![
                            NotificationAction {
                                action: ACTION_VIEW.to_string(),
                                title: "Ver Detalhes".to_string(),
                            },
                            NotificationAction {
                                action: ACTION_CALL.to_string(),
                                title: "Ligar Agora".to_string(),
                            },
                        ];
                    }
                }
                Err(e) => {
                    error!("Failed to parse push notification data: {e}");
                }
            }
        }

        self.sink.show(&descriptor).await?;
        Ok(descriptor)
    }

    /// Route a notification click to an app action.
    pub async fn handle_click(
        &self,
        action: Option<&str>,
        notification: &NotificationDescriptor,
    ) -> AppResult<ClickOutcome> {
        match action {
            Some(ACTION_CALL) => {
                if let Some(number) = &notification.data.phone_number {
                    let tel = format!("tel:{number}");
                    info!(tel, "Opening dialer from notification action");
                    self.clients.open_dialer(&tel).await?;
                    return Ok(ClickOutcome::Dialed(tel));
                }
                // A call action without a number has nowhere to go.
                Ok(ClickOutcome::Ignored)
            }
            Some(ACTION_VIEW) | None => self.focus_or_open().await,
            Some(_) => Ok(ClickOutcome::Ignored),
        }
    }

    async fn focus_or_open(&self) -> AppResult<ClickOutcome> {
        if self.clients.focus_existing().await? {
            return Ok(ClickOutcome::FocusedExisting);
        }
        self.clients.open_window(&self.config.app_url).await?;
        Ok(ClickOutcome::OpenedWindow(self.config.app_url.clone()))
    }

    /// Handle a notification being dismissed.
    ///
    /// When the descriptor requests close-tracking, the analytics POST is
    /// best-effort: a failure is logged and discarded, never retried.
    pub async fn handle_close(&self, notification: &NotificationDescriptor) {
        if !notification.data.track_close {
            return;
        }
        if let Err(e) = self
            .analytics
            .notification_closed(notification.data.id.as_deref())
            .await
        {
            error!("Failed to track notification close: {e}");
        }
    }
}
