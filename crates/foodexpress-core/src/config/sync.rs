//! Alert delivery and pending-queue configuration.

use serde::{Deserialize, Serialize};

/// Background-sync and alert delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Path of the alert delivery endpoint, resolved against the shell origin.
    #[serde(default = "default_delivery_path")]
    pub delivery_path: String,
    /// Directory holding the durable pending-alert queue.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Tag identifying the emergency-alert sync trigger.
    #[serde(default = "default_tag")]
    pub tag: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            delivery_path: default_delivery_path(),
            data_dir: default_data_dir(),
            tag: default_tag(),
        }
    }
}

fn default_delivery_path() -> String {
    "/api/emergency-alert".to_string()
}

fn default_data_dir() -> String {
    "data/pending-alerts".to_string()
}

fn default_tag() -> String {
    "emergency-alert-sync".to_string()
}
