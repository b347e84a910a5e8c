//! HTTP delivery transport for emergency alerts.

use async_trait::async_trait;
use url::Url;

use foodexpress_core::error::{AppError, ErrorKind};
use foodexpress_core::result::AppResult;
use foodexpress_core::traits::delivery::DeliveryTransport;
use foodexpress_core::types::alert::AlertPayload;

/// Posts alerts as JSON to the delivery endpoint. Any 2xx response is an
/// acknowledgement; everything else leaves the alert queued.
#[derive(Debug, Clone)]
pub struct HttpDeliveryTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpDeliveryTransport {
    /// Create a transport posting to the given endpoint.
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// The configured delivery endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl DeliveryTransport for HttpDeliveryTransport {
    async fn deliver(&self, alert: &AlertPayload) -> AppResult<()> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(alert)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Delivery,
                    format!("Failed to reach delivery endpoint '{}'", self.endpoint),
                    e,
                )
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AppError::delivery(format!(
                "Delivery endpoint returned status {status}"
            )))
        }
    }
}
