//! Demo API client.
//!
//! Fetches the read-only product and user snapshots from the demo store API
//! and normalizes them into the shared record types.
//!
//! # API Reference
//!
//! - `GET /products[?limit=N]` - Product array
//! - `GET /users` - User array (normalized into clients)
//!
//! Any non-2xx status, transport error or unparsable body is a fetch
//! failure. There are no retries; the caller decides what a failure means.

mod clients;
mod error;

pub use clients::{RemoteUser, normalize_users};
pub use error::RemoteError;

use std::sync::Arc;

use chrono::Utc;
use loja_core::{Client, Product};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};
use url::Url;

use crate::config::RemoteConfig;

/// Client for the demo store API.
///
/// Cheaply cloneable; clones share the connection pool.
#[derive(Clone)]
pub struct FakeStoreClient {
    inner: Arc<FakeStoreClientInner>,
}

struct FakeStoreClientInner {
    client: reqwest::Client,
    base_url: Url,
    products_limit: Option<u32>,
}

impl FakeStoreClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("loja-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(FakeStoreClientInner {
                client,
                base_url: config.base_url.clone(),
                products_limit: config.products_limit,
            }),
        })
    }

    /// Base URL endpoints are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Fetch the product snapshot.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the API answers non-2xx, or the
    /// body is not a product array.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, RemoteError> {
        let mut url = self.endpoint("products")?;
        if let Some(limit) = self.inner.products_limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        }

        let products: Vec<Product> = self.get(url).await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Fetch the raw user snapshot.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the API answers non-2xx, or the
    /// body is not a user array.
    #[instrument(skip(self))]
    pub async fn fetch_users(&self) -> Result<Vec<RemoteUser>, RemoteError> {
        let url = self.endpoint("users")?;
        let users: Vec<RemoteUser> = self.get(url).await?;
        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    /// Fetch the user snapshot and normalize it into clients.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_users`](Self::fetch_users).
    pub async fn fetch_clients(&self) -> Result<Vec<Client>, RemoteError> {
        let users = self.fetch_users().await?;
        Ok(normalize_users(users, Utc::now(), &mut rand::rng()))
    }

    /// Resolve `path` against the base URL, keeping any base path prefix.
    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .push(path);
        Ok(url)
    }

    /// Execute a GET request and parse the JSON body.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, RemoteError> {
        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();

        // Body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                url = %url,
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Demo API returned non-success status"
            );
            return Err(RemoteError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(
                url = %url,
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse demo API response"
            );
            RemoteError::Parse(e)
        })
    }
}

impl std::fmt::Debug for FakeStoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeStoreClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("products_limit", &self.inner.products_limit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str, limit: Option<u32>) -> FakeStoreClient {
        let mut config = RemoteConfig::new(Url::parse(base).unwrap());
        config.products_limit = limit;
        FakeStoreClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_on_bare_host() {
        let client = client("https://fakestoreapi.com", None);
        assert_eq!(
            client.endpoint("products").unwrap().as_str(),
            "https://fakestoreapi.com/products"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = client("http://localhost:9000/mirror/", None);
        assert_eq!(
            client.endpoint("users").unwrap().as_str(),
            "http://localhost:9000/mirror/users"
        );

        let client = self::client("http://localhost:9000/mirror", None);
        assert_eq!(
            client.endpoint("users").unwrap().as_str(),
            "http://localhost:9000/mirror/users"
        );
    }

    #[test]
    fn test_debug_shows_base_url() {
        let debug = format!("{:?}", client("https://fakestoreapi.com", Some(5)));
        assert!(debug.contains("fakestoreapi.com"));
        assert!(debug.contains("Some(5)"));
    }
}
