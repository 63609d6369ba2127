//! Client records.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::RecordId;
use super::status::ClientStatus;

/// A store client.
///
/// Built from the demo API's `/users` payload plus the two fields this
/// application adds: `createdAt` and `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: RecordId,
    pub email: String,
    pub username: String,
    pub name: ClientName,
    pub address: Address,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub status: ClientStatus,
}

/// First and last name, as the API nests them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientName {
    pub firstname: String,
    pub lastname: String,
}

/// Postal address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub geolocation: Geolocation,
    pub city: String,
    pub street: String,
    pub number: u32,
    pub zipcode: String,
}

/// Coordinates as the API reports them (decimal strings).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Geolocation {
    pub lat: String,
    pub long: String,
}

impl Client {
    /// "Firstname Lastname".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name.firstname, self.name.lastname)
    }
}

/// Zip code given to clients created without one.
pub const PLACEHOLDER_ZIPCODE: &str = "00000-000";

/// Form input for a client created on this device.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NewClient {
    pub email: String,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub phone: String,
    pub city: String,
    pub street: String,
    pub number: u32,
    pub zipcode: String,
    pub status: Option<ClientStatus>,
}

impl NewClient {
    /// Build the client record with the given identifier and creation time.
    ///
    /// The status defaults to [`ClientStatus::Activated`]. The form has no
    /// coordinates, so they are `"0"`; a missing street number becomes 1 and
    /// a blank zip code [`PLACEHOLDER_ZIPCODE`].
    #[must_use]
    pub fn into_client(self, id: RecordId, created_at: DateTime<Utc>) -> Client {
        Client {
            id,
            email: self.email,
            username: self.username,
            name: ClientName {
                firstname: self.firstname,
                lastname: self.lastname,
            },
            address: Address {
                geolocation: Geolocation {
                    lat: "0".to_string(),
                    long: "0".to_string(),
                },
                city: self.city,
                street: self.street,
                number: self.number.max(1),
                zipcode: if self.zipcode.trim().is_empty() {
                    PLACEHOLDER_ZIPCODE.to_string()
                } else {
                    self.zipcode
                },
            },
            phone: self.phone,
            created_at,
            status: self.status.unwrap_or_default(),
        }
    }
}

/// Column a client listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientSort {
    /// First name, alphabetical.
    FirstName,
    /// Creation date, oldest first.
    CreatedAt,
    /// Status, `activated` before `deactivated`.
    Status,
}

impl ClientSort {
    fn compare(self, a: &Client, b: &Client) -> Ordering {
        match self {
            Self::FirstName => a.name.firstname.cmp(&b.name.firstname),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
        }
    }
}

/// Sort clients in place. The sort is stable.
pub fn sort_clients(clients: &mut [Client], by: ClientSort) {
    clients.sort_by(|a, b| by.compare(a, b));
}
