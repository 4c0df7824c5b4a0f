//! Client configuration

use crate::{ClientError, ClientResult, HttpRecordStore};

/// Default record store URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the remote record store
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load from `ROSTER_API_URL` / `ROSTER_HTTP_TIMEOUT`, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("ROSTER_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            timeout: std::env::var("ROSTER_HTTP_TIMEOUT")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Reject configurations the HTTP client cannot use
    pub fn validate(&self) -> ClientResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::InvalidConfig(format!(
                "base_url must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.timeout == 0 {
            return Err(ClientError::InvalidConfig("timeout must be > 0".into()));
        }
        Ok(())
    }

    /// Create an HTTP record store from this configuration
    pub fn build_record_store(&self) -> ClientResult<HttpRecordStore> {
        HttpRecordStore::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
