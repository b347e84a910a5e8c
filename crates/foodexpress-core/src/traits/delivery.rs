//! Alert delivery transport trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::alert::AlertPayload;

/// Delivers one alert to the server.
///
/// `Ok(())` means the server acknowledged the alert (2xx). Any other HTTP
/// status and any transport failure is an `Err`, and the caller keeps the
/// alert queued for a later attempt.
#[async_trait]
pub trait DeliveryTransport: Send + Sync + std::fmt::Debug + 'static {
    /// Attempt to deliver the alert.
    async fn deliver(&self, alert: &AlertPayload) -> AppResult<()>;
}
