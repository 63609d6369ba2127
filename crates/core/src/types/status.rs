//! Status enums for records.

use serde::{Deserialize, Serialize};

/// Client account status.
///
/// Serialized in lowercase, matching the stored JSON (`"activated"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    #[default]
    Activated,
    Deactivated,
}

impl ClientStatus {
    /// Status assigned to the client at `index` in a remote snapshot.
    ///
    /// Every third client, counting from zero, is deactivated.
    #[must_use]
    pub const fn for_position(index: usize) -> Self {
        if index % 3 == 0 {
            Self::Deactivated
        } else {
            Self::Activated
        }
    }

    /// Get the status as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Activated => "activated",
            Self::Deactivated => "deactivated",
        }
    }
}

impl std::fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "activated" => Ok(Self::Activated),
            "deactivated" => Ok(Self::Deactivated),
            _ => Err(format!("invalid client status: {s}")),
        }
    }
}
