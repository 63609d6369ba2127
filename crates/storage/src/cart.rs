//! Shopping cart.

use loja_core::{CartItem, RecordId};
use rust_decimal::Decimal;

use crate::adapter::PersistentStore;

/// The shopping cart: at most one line per product, persisted on every
/// change.
#[derive(Debug)]
pub struct Cart {
    key: &'static str,
    store: PersistentStore,
    items: Vec<CartItem>,
}

impl Cart {
    /// Open the cart stored under `key`.
    #[must_use]
    pub fn open(key: &'static str, store: PersistentStore) -> Self {
        let items = store.load(key);
        Self { key, store, items }
    }

    /// Current lines, in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of `item`.
    ///
    /// If the product is already in the cart its quantity goes up by one and
    /// the existing title and price are kept. Otherwise a new line with
    /// quantity 1 is appended.
    pub fn add_item(&mut self, item: CartItem) {
        if let Some(line) = self.items.iter_mut().find(|line| line.id == item.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem {
                quantity: 1,
                ..item
            });
        }
        self.persist();
    }

    /// Remove the whole line for `id`, whatever its quantity.
    pub fn remove_item(&mut self, id: &RecordId) {
        self.items.retain(|line| line.id != *id);
        self.persist();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Sum of price times quantity over all lines.
    ///
    /// Saturates at the `Decimal` bounds instead of overflowing.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity))
    }

    fn persist(&self) {
        self.store.save(self.key, &self.items);
    }
}
