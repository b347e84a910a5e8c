//! Push notification configuration.

use serde::{Deserialize, Serialize};

/// Defaults for displayed notifications and the close-tracking endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Default notification title.
    #[serde(default = "default_title")]
    pub default_title: String,
    /// Default notification body.
    #[serde(default = "default_body")]
    pub default_body: String,
    /// Notification icon path.
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Notification badge path.
    #[serde(default = "default_icon")]
    pub badge: String,
    /// Default notification tag.
    #[serde(default = "default_tag")]
    pub default_tag: String,
    /// Path of the close-tracking analytics endpoint, resolved against
    /// the shell origin.
    #[serde(default = "default_analytics_path")]
    pub analytics_path: String,
    /// URL opened when a notification click has no app window to focus.
    #[serde(default = "default_app_url")]
    pub app_url: String,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            default_title: default_title(),
            default_body: default_body(),
            icon: default_icon(),
            badge: default_icon(),
            default_tag: default_tag(),
            analytics_path: default_analytics_path(),
            app_url: default_app_url(),
        }
    }
}

fn default_title() -> String {
    "FoodExpress".to_string()
}

fn default_body() -> String {
    "Nova notificação".to_string()
}

fn default_icon() -> String {
    "/icons/icon-192.png".to_string()
}

fn default_tag() -> String {
    "default".to_string()
}

fn default_analytics_path() -> String {
    "/api/analytics/notification-close".to_string()
}

fn default_app_url() -> String {
    "/".to_string()
}
