//! Storage errors.

use thiserror::Error;

/// Errors a key/value backend can report.
///
/// These never escape [`PersistentStore`](crate::PersistentStore); they exist
/// so the adapter can log what went wrong.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Collection could not be serialized or parsed.
    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Write rejected because the backend is full.
    #[error("quota exceeded writing {key}: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    /// Key contains characters the backend cannot store.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}
