//! Core types for Loja Online.
//!
//! This module provides the record shapes stored locally and fetched from
//! the demo API.

pub mod cart;
pub mod client;
pub mod id;
pub mod product;
pub mod status;

pub use cart::CartItem;
pub use client::{Address, Client, ClientName, ClientSort, Geolocation, NewClient, PLACEHOLDER_ZIPCODE, sort_clients};
pub use id::*;
pub use product::{DEFAULT_CATEGORY, DEFAULT_PRODUCT_IMAGE, NewProduct, Product, Rating, filter_by_title};
pub use status::*;

/// A record that lives in an identifier-unique collection.
///
/// Implemented by every type the storage layer keeps in a collection, so
/// collection operations and the merge policy can stay generic.
pub trait Record {
    /// The identifier that is unique within the record's collection.
    fn id(&self) -> &RecordId;
}

impl Record for Product {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Record for Client {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Record for CartItem {
    fn id(&self) -> &RecordId {
        &self.id
    }
}
