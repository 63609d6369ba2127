//! Integration tests for Loja Online.
//!
//! The tests drive the admin library against [`FixtureApi`], a local `axum`
//! server that stands in for the demo store API. Nothing leaves the machine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p loja-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::routing::get;
use loja_admin::config::RemoteConfig;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

/// Two products in the demo API's shape.
pub const PRODUCTS_JSON: &str = r#"[
    {
        "id": 1,
        "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 109.95,
        "description": "Your perfect pack for everyday use and walks in the forest.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    },
    {
        "id": 2,
        "title": "Mens Casual Premium Slim Fit T-Shirts",
        "price": 22.3,
        "description": "Slim-fitting style, contrast raglan long sleeve.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg",
        "rating": { "rate": 4.1, "count": 259 }
    }
]"#;

/// Four users in the demo API's shape.
pub const USERS_JSON: &str = r#"[
    {
        "address": { "geolocation": { "lat": "-37.3159", "long": "81.1496" },
            "city": "kilcoole", "street": "new road", "number": 7682, "zipcode": "12926-3874" },
        "id": 1, "email": "john@gmail.com", "username": "johnd", "password": "m38rmF$",
        "name": { "firstname": "john", "lastname": "doe" }, "phone": "1-570-236-7033", "__v": 0
    },
    {
        "address": { "geolocation": { "lat": "-37.3159", "long": "81.1496" },
            "city": "kilcoole", "street": "Lovers Ln", "number": 7267, "zipcode": "12926-3874" },
        "id": 2, "email": "morrison@gmail.com", "username": "mor_2314", "password": "83r5^_",
        "name": { "firstname": "david", "lastname": "morrison" }, "phone": "1-570-236-7033", "__v": 0
    },
    {
        "address": { "geolocation": { "lat": "40.3467", "long": "-30.1310" },
            "city": "Cullman", "street": "Frances Ct", "number": 86, "zipcode": "29567-1452" },
        "id": 3, "email": "kevin@gmail.com", "username": "kevinryan", "password": "kev02937@",
        "name": { "firstname": "kevin", "lastname": "ryan" }, "phone": "1-567-094-1345", "__v": 0
    },
    {
        "address": { "geolocation": { "lat": "50.3467", "long": "-20.1310" },
            "city": "san Antonio", "street": "Hunters Creek Dr", "number": 6454, "zipcode": "98234-1734" },
        "id": 4, "email": "don@gmail.com", "username": "donero", "password": "ewedon",
        "name": { "firstname": "don", "lastname": "romer" }, "phone": "1-765-789-6734", "__v": 0
    }
]"#;

/// A canned response: status code and raw body.
pub type Canned = (StatusCode, String);

#[derive(Debug)]
struct FixtureState {
    products: Mutex<Canned>,
    users: Mutex<Canned>,
    requests: Mutex<Vec<String>>,
}

/// A running fixture server.
///
/// Serves `GET /products` and `GET /users` with whatever was last set via
/// [`set_products`](Self::set_products) and [`set_users`](Self::set_users),
/// and records every request URI. The server task is aborted on drop.
#[derive(Debug)]
pub struct FixtureApi {
    base_url: Url,
    state: Arc<FixtureState>,
    handle: JoinHandle<()>,
}

impl FixtureApi {
    /// Start a server on an ephemeral port serving the sample payloads.
    ///
    /// # Errors
    ///
    /// Returns error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let state = Arc::new(FixtureState {
            products: Mutex::new((StatusCode::OK, PRODUCTS_JSON.to_string())),
            users: Mutex::new((StatusCode::OK, USERS_JSON.to_string())),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/products", get(products))
            .route("/users", get(users))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let base_url = Url::parse(&format!("http://{addr}"))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url,
            state,
            handle,
        })
    }

    /// Base URL of the server.
    #[must_use]
    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    /// Remote configuration pointing at this server.
    #[must_use]
    pub fn remote_config(&self) -> RemoteConfig {
        RemoteConfig::new(self.base_url())
    }

    pub fn set_products(&self, status: StatusCode, body: impl Into<String>) {
        *lock(&self.state.products) = (status, body.into());
    }

    pub fn set_users(&self, status: StatusCode, body: impl Into<String>) {
        *lock(&self.state.users) = (status, body.into());
    }

    /// Path and query of every request served so far.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        lock(&self.state.requests).clone()
    }
}

/// Remote configuration pointing at a local port nothing listens on.
///
/// The port is bound and released straight away, so connections are refused.
///
/// # Errors
///
/// Returns error if no ephemeral port can be bound.
pub fn unreachable_remote_config() -> std::io::Result<RemoteConfig> {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")?.local_addr()?;
    let base_url = Url::parse(&format!("http://{addr}"))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    Ok(RemoteConfig::new(base_url))
}

impl Drop for FixtureApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn products(State(state): State<Arc<FixtureState>>, uri: Uri) -> Canned {
    lock(&state.requests).push(uri.to_string());
    lock(&state.products).clone()
}

async fn users(State(state): State<Arc<FixtureState>>, uri: Uri) -> Canned {
    lock(&state.requests).push(uri.to_string());
    lock(&state.users).clone()
}
