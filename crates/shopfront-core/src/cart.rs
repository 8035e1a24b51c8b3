//! # Cart Module
//!
//! The session-scoped shopping cart: an ordered mapping of
//! product id → desired quantity.
//!
//! ## Semantics
//! - `set_item` **overwrites** any prior quantity for the same
//!   product (last write wins, not incremented). Adding 2 and then 5
//!   of the same product leaves the cart holding 5.
//! - The cart performs NO validation: unknown product ids and
//!   non-positive quantities are accepted here and only surface as
//!   failures at checkout.
//! - The cart is transient. It lives in the session and is never
//!   persisted; it is cleared if and only if checkout fully succeeds.
//!
//! ## Why a BTreeMap?
//! Iteration order is deterministic, which keeps checkout line
//! ordering and test assertions stable across runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A shopping cart: product id → quantity.
///
/// Serializes to the flat `{"<product_id>": <quantity>}` JSON object
/// that `/reviewCart` returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: BTreeMap<String, i64>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            entries: BTreeMap::new(),
        }
    }

    /// Sets the quantity for a product, overwriting any prior value.
    ///
    /// Returns the previous quantity if the product was already in
    /// the cart.
    pub fn set_item(&mut self, product_id: impl Into<String>, quantity: i64) -> Option<i64> {
        self.entries.insert(product_id.into(), quantity)
    }

    /// Returns the quantity for a product, if present.
    pub fn quantity(&self, product_id: &str) -> Option<i64> {
        self.entries.get(product_id).copied()
    }

    /// Removes a product from the cart.
    ///
    /// Returns the removed quantity, or `None` if the product was not
    /// in the cart.
    pub fn remove_item(&mut self, product_id: &str) -> Option<i64> {
        self.entries.remove(product_id)
    }

    /// Clears all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of distinct products in the cart.
    ///
    /// A successful checkout creates exactly this many order details.
    pub fn distinct_products(&self) -> usize {
        self.entries.len()
    }

    /// Returns the total quantity across all entries.
    pub fn total_quantity(&self) -> i64 {
        self.entries.values().sum()
    }

    /// Iterates over (product id, quantity) pairs in product-id order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(id, qty)| (id.as_str(), *qty))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_item_overwrites_not_sums() {
        let mut cart = Cart::new();

        assert_eq!(cart.set_item("prod-a", 2), None);
        assert_eq!(cart.set_item("prod-a", 5), Some(2));

        // Last write wins: 5, not 7
        assert_eq!(cart.quantity("prod-a"), Some(5));
        assert_eq!(cart.distinct_products(), 1);
    }

    #[test]
    fn test_accepts_invalid_quantities() {
        // No validation at this layer: bad values fail at checkout
        let mut cart = Cart::new();
        cart.set_item("prod-a", 0);
        cart.set_item("prod-b", -3);

        assert_eq!(cart.quantity("prod-a"), Some(0));
        assert_eq!(cart.quantity("prod-b"), Some(-3));
        assert_eq!(cart.distinct_products(), 2);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.set_item("prod-a", 2);

        assert_eq!(cart.remove_item("prod-a"), Some(2));
        assert_eq!(cart.remove_item("prod-a"), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.set_item("prod-a", 2);
        cart.set_item("prod-b", 1);
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.distinct_products(), 0);
    }

    #[test]
    fn test_total_quantity() {
        let mut cart = Cart::new();
        cart.set_item("prod-a", 2);
        cart.set_item("prod-b", 1);

        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_entries_are_ordered() {
        let mut cart = Cart::new();
        cart.set_item("zebra", 1);
        cart.set_item("apple", 2);

        let ids: Vec<&str> = cart.entries().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["apple", "zebra"]);
    }

    #[test]
    fn test_serializes_as_flat_mapping() {
        let mut cart = Cart::new();
        cart.set_item("prod-a", 2);
        cart.set_item("prod-b", 5);

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json, serde_json::json!({"prod-a": 2, "prod-b": 5}));

        let empty = Cart::new();
        assert_eq!(serde_json::to_value(&empty).unwrap(), serde_json::json!({}));
    }
}
