//! Network client backed by reqwest.

use async_trait::async_trait;
use http::header::CONTENT_TYPE;
use url::Url;

use foodexpress_core::error::{AppError, ErrorKind};
use foodexpress_core::result::AppResult;
use foodexpress_core::traits::net::NetworkClient;
use foodexpress_core::types::http::{FetchRequest, FetchResponse, ResponseKind};

/// [`NetworkClient`] implementation over a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestNetworkClient {
    client: reqwest::Client,
    app_origin: Url,
}

impl ReqwestNetworkClient {
    /// Create a client that classifies responses against the given origin.
    pub fn new(app_origin: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            app_origin,
        }
    }

    fn classify(&self, url: &Url) -> ResponseKind {
        if url.origin() == self.app_origin.origin() {
            ResponseKind::Basic
        } else {
            ResponseKind::Cors
        }
    }
}

#[async_trait]
impl NetworkClient for ReqwestNetworkClient {
    async fn fetch(&self, request: &FetchRequest) -> AppResult<FetchResponse> {
        let response = self
            .client
            .request(request.method.clone(), request.url.clone())
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Network,
                    format!("Fetch failed for '{}'", request.url),
                    e,
                )
            })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let kind = self.classify(&request.url);

        let body = response.bytes().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Network,
                format!("Failed to read body of '{}'", request.url),
                e,
            )
        })?;

        Ok(FetchResponse::new(status, content_type, body, kind))
    }
}
