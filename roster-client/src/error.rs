//! Client error types

use thiserror::Error;

/// Client error type
///
/// Every failure of a record store call ends up here; nothing panics
/// past the adapter boundary.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status not covered by a dedicated variant
    #[error("Unexpected status {code}: {body}")]
    Status { code: u16, body: String },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected by the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Store refused to serve the call
    #[error("Record store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
