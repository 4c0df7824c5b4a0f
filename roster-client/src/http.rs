//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Thin JSON-over-HTTP client used by [`crate::HttpRecordStore`]
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidConfig(format!("base_url: {e}")))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Append percent-encoded path segments to the base URL
    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidConfig("base_url cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        let url = self.url(segments)?;
        tracing::debug!(method = "GET", path = url.path(), "record store request");
        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Make a PUT request with JSON body; the response body is ignored
    pub async fn put<B: serde::Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> ClientResult<()> {
        let url = self.url(segments)?;
        tracing::debug!(method = "PUT", path = url.path(), "record store request");
        let response = self.client.put(url).json(body).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Map non-success statuses to errors
    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), body = %text, "record store returned error status");
        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(ClientError::Validation(text))
            }
            _ => Err(ClientError::Status {
                code: status.as_u16(),
                body: text,
            }),
        }
    }
}
