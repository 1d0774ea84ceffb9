//! Cart store and derived pricing
//!
//! Authoritative in-memory representation of the customer's selections,
//! kept durable across restarts via [`CartStorage`]. Pricing totals are
//! never stored; they are recomputed from the current items and the
//! convenience-fee snapshot on every read.

pub mod storage;

pub use storage::{CartStorage, CartStorageError};

use crate::money::{round_money, to_decimal, to_f64};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{ConvenienceFeeCharge, ConvenienceFeeConfig, Product};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
    /// Quantities must be at least 1; zero means "remove", which has its
    /// own operation
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(u32),

    /// Snapshot persistence failed (in-memory state is still valid)
    #[error("cart storage error: {0}")]
    Storage(#[from] CartStorageError),
}

/// One selected product with its quantity
///
/// Invariant: at most one item per product id, quantity ≥ 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// price × quantity for this line
    fn line_total(&self) -> Decimal {
        to_decimal(self.product.price) * Decimal::from(self.quantity)
    }
}

/// Derived pricing, a pure function of items + fee config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    pub subtotal: f64,
    pub convenience_fee: ConvenienceFeeCharge,
    pub total: f64,
    pub item_count: u32,
}

/// Cart store
///
/// An owned handle, injected where needed; mutations are synchronous and
/// persist the full snapshot before returning. A persistence failure
/// surfaces as [`CartError::Storage`] after the in-memory state has
/// already been updated, so the cart itself stays consistent.
#[derive(Debug)]
pub struct CartStore {
    items: Vec<CartItem>,
    fee_config: ConvenienceFeeConfig,
    storage: Option<CartStorage>,
}

impl CartStore {
    /// Open a cart backed by durable storage, restoring any snapshot
    pub fn open(storage: CartStorage) -> Self {
        let items = storage.load();
        Self {
            items,
            fee_config: ConvenienceFeeConfig::default(),
            storage: Some(storage),
        }
    }

    /// Cart without persistence (tests, previews)
    pub fn in_memory() -> Self {
        Self {
            items: Vec::new(),
            fee_config: ConvenienceFeeConfig::default(),
            storage: None,
        }
    }

    /// Install the convenience-fee snapshot fetched at startup
    ///
    /// Settings are fetched once per session and not re-fetched; a stale
    /// fee configuration is an accepted limitation. The server recomputes
    /// pricing at order time regardless.
    pub fn set_fee_config(&mut self, config: ConvenienceFeeConfig) {
        self.fee_config = config;
    }

    /// Current fee configuration snapshot
    pub fn fee_config(&self) -> ConvenienceFeeConfig {
        self.fee_config
    }

    /// Items in insertion order
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a product, merging with an existing line for the same id
    pub fn add_item(&mut self, product: Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(item) => item.quantity += quantity,
            None => self.items.push(CartItem { product, quantity }),
        }

        self.persist()
    }

    /// Remove the line for a product; no-op when absent
    pub fn remove_item(&mut self, product_id: &str) -> Result<(), CartError> {
        self.items.retain(|i| i.product.id != product_id);
        self.persist()
    }

    /// Overwrite a line's quantity; zero removes the line
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity;
        }

        self.persist()
    }

    /// Empty the cart
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.items.clear();
        self.persist()
    }

    /// Total unit count across all lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Derived pricing for the current cart
    ///
    /// subtotal = Σ price × quantity; fee = subtotal × percent / 100
    /// (half-up, 2 decimals) when enabled, else zero; total rounded the
    /// same way.
    pub fn totals(&self) -> CartTotals {
        let subtotal: Decimal = self.items.iter().map(CartItem::line_total).sum();

        let convenience_fee = if self.fee_config.enabled {
            let value = round_money(
                subtotal * to_decimal(self.fee_config.percent) / Decimal::ONE_HUNDRED,
            );
            ConvenienceFeeCharge {
                percent: self.fee_config.percent,
                value: to_f64(value),
            }
        } else {
            ConvenienceFeeCharge::default()
        };

        CartTotals {
            subtotal: to_f64(subtotal),
            total: to_f64(round_money(subtotal + to_decimal(convenience_fee.value))),
            convenience_fee,
            item_count: self.item_count(),
        }
    }

    /// Persist the full snapshot after a mutation
    fn persist(&self) -> Result<(), CartError> {
        if let Some(storage) = &self.storage {
            storage.save(&self.items)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Category;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Produto {}", id),
            description: String::new(),
            price,
            category: Category::Doces,
            image_url: String::new(),
            available: true,
            featured: false,
            sort_order: 0,
        }
    }

    fn fee(enabled: bool, percent: f64) -> ConvenienceFeeConfig {
        ConvenienceFeeConfig { enabled, percent }
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = CartStore::in_memory();
        cart.add_item(product("p1", 5.0), 1).unwrap();
        cart.add_item(product("p1", 5.0), 2).unwrap();
        cart.add_item(product("p2", 3.5), 1).unwrap();

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = CartStore::in_memory();
        cart.add_item(product("b", 1.0), 1).unwrap();
        cart.add_item(product("a", 1.0), 1).unwrap();
        cart.add_item(product("b", 1.0), 1).unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_zero_quantity_add_rejected() {
        let mut cart = CartStore::in_memory();
        let result = cart.add_item(product("p1", 5.0), 0);
        assert!(matches!(result, Err(CartError::InvalidQuantity(0))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = CartStore::in_memory();
        cart.add_item(product("p1", 5.0), 2).unwrap();
        cart.update_quantity("p1", 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_overwrites() {
        let mut cart = CartStore::in_memory();
        cart.add_item(product("p1", 5.0), 2).unwrap();
        cart.update_quantity("p1", 7).unwrap();
        assert_eq!(cart.items()[0].quantity, 7);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = CartStore::in_memory();
        cart.add_item(product("p1", 5.0), 1).unwrap();
        cart.remove_item("ghost").unwrap();
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_invariants_under_mutation_sequence() {
        let mut cart = CartStore::in_memory();
        cart.add_item(product("a", 1.0), 2).unwrap();
        cart.add_item(product("b", 2.0), 1).unwrap();
        cart.add_item(product("a", 1.0), 3).unwrap();
        cart.update_quantity("b", 0).unwrap();
        cart.add_item(product("b", 2.0), 1).unwrap();
        cart.remove_item("a").unwrap();
        cart.add_item(product("a", 1.0), 1).unwrap();

        let mut ids: Vec<&str> = cart.items().iter().map(|i| i.product.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), cart.items().len(), "duplicate product entries");
        assert!(cart.items().iter().all(|i| i.quantity >= 1));
    }

    #[test]
    fn test_subtotal() {
        let mut cart = CartStore::in_memory();
        cart.add_item(product("p1", 5.0), 2).unwrap();
        cart.add_item(product("p2", 3.5), 1).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.subtotal, 13.5);
        assert_eq!(totals.item_count, 3);
    }

    #[test]
    fn test_fee_disabled_is_zero() {
        let mut cart = CartStore::in_memory();
        cart.set_fee_config(fee(false, 10.0));
        cart.add_item(product("p1", 5.0), 2).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.convenience_fee.percent, 0.0);
        assert_eq!(totals.convenience_fee.value, 0.0);
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_fee_enabled_ten_percent() {
        let mut cart = CartStore::in_memory();
        cart.set_fee_config(fee(true, 10.0));
        cart.add_item(product("p1", 5.0), 2).unwrap();
        cart.add_item(product("p2", 3.5), 1).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.subtotal, 13.5);
        assert_eq!(totals.convenience_fee.value, 1.35);
        assert_eq!(totals.total, 14.85);
    }

    #[test]
    fn test_fee_rounding_half_up() {
        // subtotal 10.05, 10% fee = 1.005 → rounds away from zero to 1.01
        let mut cart = CartStore::in_memory();
        cart.set_fee_config(fee(true, 10.0));
        cart.add_item(product("p1", 10.05), 1).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.convenience_fee.value, 1.01);
        assert_eq!(totals.total, 11.06);
    }

    #[test]
    fn test_persisted_cart_restores() {
        let dir = tempfile::TempDir::new().unwrap();

        {
            let mut cart = CartStore::open(CartStorage::new(dir.path()));
            cart.add_item(product("p1", 5.0), 2).unwrap();
            cart.add_item(product("p2", 3.5), 1).unwrap();
        }

        let cart = CartStore::open(CartStorage::new(dir.path()));
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.totals().subtotal, 13.5);
    }

    #[test]
    fn test_clear_persists_empty_snapshot() {
        let dir = tempfile::TempDir::new().unwrap();

        let mut cart = CartStore::open(CartStorage::new(dir.path()));
        cart.add_item(product("p1", 5.0), 1).unwrap();
        cart.clear().unwrap();

        let restored = CartStore::open(CartStorage::new(dir.path()));
        assert!(restored.is_empty());
    }
}
