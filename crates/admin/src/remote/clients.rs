//! Normalization of the demo API's users into clients.

use chrono::{DateTime, Duration, Utc};
use loja_core::format::capitalize_first_letter;
use loja_core::{Address, Client, ClientName, ClientStatus, RecordId};
use rand::Rng;
use serde::Deserialize;

/// Window the synthetic creation dates are drawn from.
const CREATED_AT_WINDOW_MS: i64 = 5 * 365 * 24 * 60 * 60 * 1000;

/// A user as returned by `GET /users`.
///
/// Fields this application does not keep (`password`, `__v`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteUser {
    pub id: u64,
    pub email: String,
    pub username: String,
    pub name: ClientName,
    pub address: Address,
    pub phone: String,
}

/// Turn a users snapshot into clients.
///
/// Names and city are capitalized, `created_at` is drawn uniformly from the
/// five years before `now`, and every third user by position (0, 3, 6, ...)
/// is deactivated.
pub fn normalize_users<R: Rng>(
    users: Vec<RemoteUser>,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Client> {
    users
        .into_iter()
        .enumerate()
        .map(|(index, user)| Client {
            id: RecordId::Remote(user.id),
            email: user.email,
            username: user.username,
            name: ClientName {
                firstname: capitalize_first_letter(&user.name.firstname),
                lastname: capitalize_first_letter(&user.name.lastname),
            },
            address: Address {
                city: capitalize_first_letter(&user.address.city),
                ..user.address
            },
            phone: user.phone,
            created_at: random_created_at(now, rng),
            status: ClientStatus::for_position(index),
        })
        .collect()
}

fn random_created_at<R: Rng>(now: DateTime<Utc>, rng: &mut R) -> DateTime<Utc> {
    now - Duration::milliseconds(rng.random_range(0..CREATED_AT_WINDOW_MS))
}
