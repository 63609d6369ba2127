//! The service object owning every local collection.

use std::sync::Arc;

use loja_core::{Client, Product};

use crate::adapter::PersistentStore;
use crate::backend::KeyValueStore;
use crate::cart::Cart;
use crate::repository::Repository;

/// Storage key for locally known products.
pub const PRODUCTS_KEY: &str = "localProducts_v1";

/// Storage key for locally known clients.
pub const CLIENTS_KEY: &str = "localClients_v1";

/// Storage key for the shopping cart.
pub const CART_KEY: &str = "cart";

/// Products, clients and cart for one device.
///
/// Constructed once at startup with the backend to persist into, then passed
/// by reference to whatever drives it. There is nothing to close: every
/// mutation has already been written when it returns.
#[derive(Debug)]
pub struct Workspace {
    products: Repository<Product>,
    clients: Repository<Client>,
    cart: Cart,
}

impl Workspace {
    /// Load all three collections from `backend`.
    #[must_use]
    pub fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        let store = PersistentStore::new(backend);
        let workspace = Self {
            products: Repository::open(PRODUCTS_KEY, store.clone()),
            clients: Repository::open(CLIENTS_KEY, store.clone()),
            cart: Cart::open(CART_KEY, store),
        };
        tracing::info!(
            products = workspace.products.len(),
            clients = workspace.clients.len(),
            cart_lines = workspace.cart.items().len(),
            "Workspace loaded"
        );
        workspace
    }

    /// Local products.
    #[must_use]
    pub const fn products(&self) -> &Repository<Product> {
        &self.products
    }

    /// Local products, for mutation.
    pub const fn products_mut(&mut self) -> &mut Repository<Product> {
        &mut self.products
    }

    /// Local clients.
    #[must_use]
    pub const fn clients(&self) -> &Repository<Client> {
        &self.clients
    }

    /// Local clients, for mutation.
    pub const fn clients_mut(&mut self) -> &mut Repository<Client> {
        &mut self.clients
    }

    /// The shopping cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The shopping cart, for mutation.
    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }
}
