//! Best-effort analytics reporting for notification lifecycle events.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use url::Url;

use foodexpress_core::error::{AppError, ErrorKind};
use foodexpress_core::result::AppResult;

/// Receives notification lifecycle analytics.
#[async_trait]
pub trait AnalyticsSink: Send + Sync + std::fmt::Debug + 'static {
    /// Report that a notification was closed.
    async fn notification_closed(&self, notification_id: Option<&str>) -> AppResult<()>;
}

/// Posts close events to the analytics endpoint.
///
/// This is fire-and-forget by contract: the caller logs failures and
/// never retries.
#[derive(Debug, Clone)]
pub struct HttpAnalytics {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpAnalytics {
    /// Create a reporter posting to the given endpoint.
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl AnalyticsSink for HttpAnalytics {
    async fn notification_closed(&self, notification_id: Option<&str>) -> AppResult<()> {
        let body = serde_json::json!({
            "notificationId": notification_id,
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        });
        self.client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Internal,
                    format!("Failed to reach analytics endpoint '{}'", self.endpoint),
                    e,
                )
            })?;
        Ok(())
    }
}
