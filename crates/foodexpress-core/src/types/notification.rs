//! Notification descriptors and inbound push payloads.

use serde::{Deserialize, Serialize};

use crate::config::notifications::NotificationsConfig;

/// Push payload type that marks an emergency response from the hotline.
pub const EMERGENCY_RESPONSE: &str = "emergency-response";

/// A button attached to a displayed notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    /// Action id routed back on click (`"view"`, `"call"`).
    pub action: String,
    /// Button label.
    pub title: String,
}

/// Opaque payload carried by a notification and passed through to click
/// and close handling. Field names match the push wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    /// Notification id, reported to analytics on close.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Phone number dialed by the `"call"` action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Whether closing this notification should be reported to analytics.
    #[serde(default)]
    pub track_close: bool,
}

/// Everything needed to display one notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDescriptor {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    /// The notification stays on screen until the user interacts with it.
    /// Forced to `true` for emergency responses.
    pub require_interaction: bool,
    pub silent: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NotificationAction>,
    #[serde(default)]
    pub data: NotificationData,
}

impl NotificationDescriptor {
    /// The default descriptor used when a push event carries no body or a
    /// malformed one.
    pub fn default_from(config: &NotificationsConfig) -> Self {
        Self {
            title: config.default_title.clone(),
            body: config.default_body.clone(),
            icon: config.icon.clone(),
            badge: config.badge.clone(),
            tag: config.default_tag.clone(),
            require_interaction: false,
            silent: false,
            actions: Vec::new(),
            data: NotificationData::default(),
        }
    }

    /// Overlay the fields present in a parsed push payload over this
    /// descriptor. Absent fields keep their current value.
    pub fn apply(&mut self, payload: &PushPayload) {
        if let Some(title) = &payload.title {
            self.title = title.clone();
        }
        if let Some(body) = &payload.body {
            self.body = body.clone();
        }
        if let Some(icon) = &payload.icon {
            self.icon = icon.clone();
        }
        if let Some(badge) = &payload.badge {
            self.badge = badge.clone();
        }
        if let Some(tag) = &payload.tag {
            self.tag = tag.clone();
        }
        if let Some(require_interaction) = payload.require_interaction {
            self.require_interaction = require_interaction;
        }
        if let Some(silent) = payload.silent {
            self.silent = silent;
        }
        if let Some(data) = &payload.data {
            self.data = data.clone();
        }
    }
}

/// Partial overlay parsed from an inbound push body. Every field is
/// optional; merging applies only the fields the provider sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    /// Push payload type (e.g. `"emergency-response"`).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub require_interaction: Option<bool>,
    #[serde(default)]
    pub silent: Option<bool>,
    #[serde(default)]
    pub data: Option<NotificationData>,
}

impl PushPayload {
    /// Whether this payload marks an emergency response.
    pub fn is_emergency_response(&self) -> bool {
        self.kind.as_deref() == Some(EMERGENCY_RESPONSE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overlays_present_fields_only() {
        let config = NotificationsConfig::default();
        let mut descriptor = NotificationDescriptor::default_from(&config);

        let payload: PushPayload = serde_json::from_str(
            r#"{"title":"Resposta recebida","data":{"id":"n-1","trackClose":true}}"#,
        )
        .unwrap();
        descriptor.apply(&payload);

        assert_eq!(descriptor.title, "Resposta recebida");
        // Untouched fields keep the configured defaults.
        assert_eq!(descriptor.body, "Nova notificação");
        assert_eq!(descriptor.tag, "default");
        assert_eq!(descriptor.data.id.as_deref(), Some("n-1"));
        assert!(descriptor.data.track_close);
    }

    #[test]
    fn test_emergency_response_detection() {
        let payload: PushPayload =
            serde_json::from_str(r#"{"type":"emergency-response"}"#).unwrap();
        assert!(payload.is_emergency_response());

        let other: PushPayload = serde_json::from_str(r#"{"type":"promo"}"#).unwrap();
        assert!(!other.is_emergency_response());
    }

    #[test]
    fn test_data_wire_names() {
        let data: NotificationData =
            serde_json::from_str(r#"{"phoneNumber":"180","trackClose":false}"#).unwrap();
        assert_eq!(data.phone_number.as_deref(), Some("180"));
        assert!(!data.track_close);
    }
}
