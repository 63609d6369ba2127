//! Business logic services for admin.
//!
//! # Services
//!
//! - `catalog` - Local product/client creation, cart additions and queries
//! - `sync` - Fail-open refresh of local collections from the demo API

pub mod catalog;
pub mod sync;

pub use catalog::{add_product_to_cart, create_client, create_product, search_products, sorted_clients};
pub use sync::{RefreshOutcome, RefreshReport, SyncService, apply_snapshot};
