//! Integration tests for the demo API fetch collaborators.
//!
//! Each test starts its own fixture server on an ephemeral port.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use loja_admin::remote::{FakeStoreClient, RemoteError};
use loja_core::{ClientStatus, RecordId};
use loja_integration_tests::{FixtureApi, unreachable_remote_config};
use rust_decimal::Decimal;

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn test_fetch_products() {
    let api = FixtureApi::start().await.unwrap();
    let client = FakeStoreClient::new(&api.remote_config()).unwrap();

    let products = client.fetch_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, RecordId::Remote(1));
    assert_eq!(products[0].price, Decimal::new(10995, 2));
    assert_eq!(products[1].rating.count, 259);
    assert_eq!(api.requests(), vec!["/products".to_string()]);
}

#[tokio::test]
async fn test_fetch_products_sends_limit() {
    let api = FixtureApi::start().await.unwrap();
    let mut config = api.remote_config();
    config.products_limit = Some(5);
    let client = FakeStoreClient::new(&config).unwrap();

    client.fetch_products().await.unwrap();

    assert_eq!(api.requests(), vec!["/products?limit=5".to_string()]);
}

#[tokio::test]
async fn test_non_success_status_is_failure() {
    let api = FixtureApi::start().await.unwrap();
    api.set_products(StatusCode::INTERNAL_SERVER_ERROR, "boom");
    let client = FakeStoreClient::new(&api.remote_config()).unwrap();

    let err = client.fetch_products().await.unwrap_err();

    assert!(
        matches!(err, RemoteError::Api { status: 500, ref message } if message == "boom"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_malformed_body_is_failure() {
    let api = FixtureApi::start().await.unwrap();
    api.set_products(StatusCode::OK, "{\"not\": \"an array\"}");
    let client = FakeStoreClient::new(&api.remote_config()).unwrap();

    let err = client.fetch_products().await.unwrap_err();

    assert!(matches!(err, RemoteError::Parse(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_connection_refused_is_failure() {
    let client = FakeStoreClient::new(&unreachable_remote_config().unwrap()).unwrap();

    let err = client.fetch_products().await.unwrap_err();

    assert!(matches!(err, RemoteError::Http(_)), "unexpected error: {err:?}");
}

// =============================================================================
// Clients
// =============================================================================

#[tokio::test]
async fn test_fetch_clients_normalizes_users() {
    let api = FixtureApi::start().await.unwrap();
    let client = FakeStoreClient::new(&api.remote_config()).unwrap();

    let clients = client.fetch_clients().await.unwrap();

    assert_eq!(clients.len(), 4);
    assert_eq!(clients[0].full_name(), "John Doe");
    assert_eq!(clients[3].address.city, "San Antonio");

    let statuses: Vec<_> = clients.iter().map(|c| c.status).collect();
    assert_eq!(
        statuses,
        vec![
            ClientStatus::Deactivated,
            ClientStatus::Activated,
            ClientStatus::Activated,
            ClientStatus::Deactivated,
        ]
    );
    assert_eq!(api.requests(), vec!["/users".to_string()]);
}
