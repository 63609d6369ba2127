//! Remote fetch errors.

use thiserror::Error;

/// Errors that can occur when fetching from the demo API.
///
/// Any of these means the fetch failed as a whole; callers keep their local
/// collections untouched.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built from the configured base.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
}
