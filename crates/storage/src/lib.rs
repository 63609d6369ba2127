//! Loja Storage - Local persistence and reconciliation.
//!
//! Everything the storefront admin keeps on the device lives here:
//!
//! - [`backend`] - Key/value backends ([`MemoryStore`], [`FileStore`])
//! - [`adapter`] - [`PersistentStore`], best-effort JSON collections on top of a backend
//! - [`collection`] - Pure collection operations
//! - [`merge`] - The local-wins merge policy applied on every remote refresh
//! - [`repository`] - [`Repository`], a write-through collection of records
//! - [`cart`] - [`Cart`], the quantity-aggregating shopping cart
//! - [`workspace`] - [`Workspace`], the service object owning all three collections
//!
//! # Error model
//!
//! Nothing here is fatal. Unreadable payloads load as empty collections and
//! failed writes are logged and dropped; the in-memory state stays correct
//! until the next successful write. Backends still report [`StorageError`]
//! so the adapter can decide what to log.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use loja_core::{CartItem, RecordId};
//! use loja_storage::{MemoryStore, Workspace};
//! use rust_decimal::Decimal;
//!
//! let mut workspace = Workspace::open(Arc::new(MemoryStore::new()));
//! workspace.cart_mut().add_item(CartItem {
//!     id: RecordId::Remote(1),
//!     title: "Backpack".to_string(),
//!     price: Decimal::new(10995, 2),
//!     image: None,
//!     quantity: 1,
//! });
//! assert_eq!(workspace.cart().total(), Decimal::new(10995, 2));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod adapter;
pub mod backend;
pub mod cart;
pub mod collection;
mod error;
pub mod merge;
pub mod repository;
pub mod workspace;

pub use adapter::PersistentStore;
pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use cart::Cart;
pub use collection::CollectionOp;
pub use error::StorageError;
pub use merge::merge_local_wins;
pub use repository::Repository;
pub use workspace::{CART_KEY, CLIENTS_KEY, PRODUCTS_KEY, Workspace};
