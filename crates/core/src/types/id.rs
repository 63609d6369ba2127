//! Record identifiers.
//!
//! Records fetched from the demo API carry numeric identifiers. Records
//! created on this device carry a time-based string identifier of the form
//! `local-<unix millis>`, so the two schemes never overlap by construction.
//!
//! Both serialize exactly like the JSON the API and the local store use: a
//! bare number for remote records and a bare string for local ones.

use core::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Prefix carried by identifiers minted on this device.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Errors that can occur when parsing a [`RecordId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordIdError {
    /// The input string is empty.
    #[error("record id cannot be empty")]
    Empty,
}

/// Identifier of a product, client or cart line.
///
/// Equality follows the stored JSON: the remote id `1` and the local id
/// `"1"` are different identifiers.
///
/// ## Examples
///
/// ```
/// use loja_core::RecordId;
///
/// let remote: RecordId = serde_json::from_str("7").unwrap();
/// assert_eq!(remote, RecordId::Remote(7));
///
/// let local: RecordId = serde_json::from_str("\"local-1700000000000\"").unwrap();
/// assert!(local.is_local());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric identifier assigned by the remote API.
    Remote(u64),
    /// String identifier assigned on this device.
    Local(String),
}

impl RecordId {
    /// Mint a fresh local identifier from the current wall clock.
    #[must_use]
    pub fn new_local() -> Self {
        Self::local_at(Utc::now().timestamp_millis())
    }

    /// Build the local identifier for a given unix timestamp in milliseconds.
    #[must_use]
    pub fn local_at(millis: i64) -> Self {
        Self::Local(format!("{LOCAL_ID_PREFIX}{millis}"))
    }

    /// Whether this identifier was minted on this device.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// Get the numeric value of a remote identifier.
    #[must_use]
    pub const fn as_remote(&self) -> Option<u64> {
        match self {
            Self::Remote(id) => Some(*id),
            Self::Local(_) => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(id) => write!(f, "{id}"),
            Self::Local(id) => f.write_str(id),
        }
    }
}

impl FromStr for RecordId {
    type Err = RecordIdError;

    /// Parse an identifier typed by a user: digits become a remote id,
    /// anything else a local one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RecordIdError::Empty);
        }
        Ok(s.parse::<u64>()
            .map_or_else(|_| Self::Local(s.to_string()), Self::Remote))
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self::Remote(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::Local(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self::Local(id)
    }
}
