//! # Cart Store
//!
//! The session's shopping cart: an ordered sequence of product snapshots.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  User Action              Operation              Cart Change            │
//! │  ───────────              ─────────              ───────────            │
//! │                                                                         │
//! │  "Add to cart" ──────────► add(product) ────────► entries.push(entry)  │
//! │                                                                         │
//! │  "Remove item" ──────────► remove(id) ──────────► retain(id != x)      │
//! │                                                                         │
//! │  Drop one slot ──────────► remove_entry(eid) ───► entries.remove(i)    │
//! │                                                                         │
//! │  Nav badge ──────────────► summary() ───────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Entries keep insertion order.
//! - The same product may occupy several slots; each slot has its own
//!   `entry_id`.
//! - `count()` is the number of slots; `total()` is the sum of the prices
//!   frozen when each slot was added.
//! - No operation fails. Removing an id that is not in the cart is a no-op.
//!
//! ## Example
//! ```rust
//! use storefront_core::{Cart, Money, Product, ProductId};
//!
//! let product = |id: u64, cents: i64| Product {
//!     id: ProductId::new(id),
//!     title: format!("Product {}", id),
//!     price: Money::from_cents(cents),
//!     description: String::new(),
//!     category: String::new(),
//!     image: String::new(),
//! };
//!
//! let mut cart = Cart::new();
//! cart.add(&product(1, 999));
//! cart.add(&product(2, 500));
//! assert_eq!(cart.count(), 2);
//! assert_eq!(cart.total(), "14.99");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Cart Entry
// =============================================================================

/// One slot in the cart.
///
/// `product` is a copy taken when the slot was added, so the cart keeps its
/// price even if the catalog later reports a different one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartEntry {
    /// Slot identity, unique within the session.
    #[ts(as = "String")]
    pub entry_id: Uuid,

    /// Product snapshot at time of adding (frozen).
    pub product: Product,

    /// When this slot was added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartEntry {
    /// Creates a new slot from a product.
    pub fn from_product(product: &Product) -> Self {
        CartEntry {
            entry_id: Uuid::new_v4(),
            product: product.clone(),
            added_at: Utc::now(),
        }
    }

    /// The product identifier of this slot.
    #[inline]
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// The price frozen when this slot was added.
    #[inline]
    pub fn price(&self) -> Money {
        self.product.price
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            entries: Vec::new(),
        }
    }

    /// Appends a snapshot of `product` to the end of the cart.
    ///
    /// No deduplication and no stock check: adding the same product twice
    /// yields two slots.
    pub fn add(&mut self, product: &Product) {
        self.entries.push(CartEntry::from_product(product));
    }

    /// Removes every slot holding `product_id`.
    ///
    /// Returns the number of slots removed; zero when the product was not in
    /// the cart.
    pub fn remove(&mut self, product_id: ProductId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.product_id() != product_id);
        before - self.entries.len()
    }

    /// Removes the single slot identified by `entry_id`.
    pub fn remove_entry(&mut self, entry_id: Uuid) -> bool {
        match self.entries.iter().position(|e| e.entry_id == entry_id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of slots in the cart.
    #[inline]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Sum of slot prices.
    pub fn total_amount(&self) -> Money {
        self.entries.iter().map(CartEntry::price).sum()
    }

    /// Sum of slot prices with two decimals, `"0.00"` for an empty cart.
    pub fn total(&self) -> String {
        self.total_amount().to_decimal_string()
    }

    /// Checks if the cart is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slots in insertion order.
    #[inline]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Number of slots holding `product_id`.
    pub fn quantity_of(&self, product_id: ProductId) -> usize {
        self.entries
            .iter()
            .filter(|e| e.product_id() == product_id)
            .count()
    }

    /// Count and total for the navigation badge.
    pub fn summary(&self) -> CartSummary {
        CartSummary::from(self)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Cart Summary
// =============================================================================

/// Derived cart state for the navigation badge and the cart footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    #[ts(type = "number")]
    pub count: usize,

    /// Two-decimal total, e.g. `"14.99"`.
    pub total: String,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        CartSummary {
            count: cart.count(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_product(id: u64, price_cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {}", id),
            price: Money::from_cents(price_cents),
            description: format!("Description {}", id),
            category: "electronics".to_string(),
            image: "https://via.placeholder.com/150".to_string(),
        }
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new();
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), "0.00");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_two_products() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 999));
        cart.add(&test_product(2, 500));

        assert_eq!(cart.count(), 2);
        assert_eq!(cart.total(), "14.99");
    }

    #[test]
    fn test_count_and_total_track_every_add() {
        let prices = [1099, 1, 0, 55_99, 2_000_00, 7];
        let mut cart = Cart::new();
        let mut expected = 0;

        for (i, cents) in prices.iter().enumerate() {
            cart.add(&test_product(i as u64 % 3, *cents));
            expected += cents;
            assert_eq!(cart.count(), i + 1);
            assert_eq!(cart.total_amount().cents(), expected);
        }
        assert_eq!(cart.total(), Money::from_cents(expected).to_decimal_string());
    }

    #[test]
    fn test_add_same_product_keeps_separate_slots() {
        let mut cart = Cart::new();
        let product = test_product(1, 1000);

        cart.add(&product);
        cart.add(&product);

        assert_eq!(cart.count(), 2);
        assert_eq!(cart.quantity_of(product.id), 2);
        assert_ne!(cart.entries()[0].entry_id, cart.entries()[1].entry_id);
    }

    #[test]
    fn test_remove_takes_out_all_matching_slots() {
        let mut cart = Cart::new();
        let product = test_product(1, 1000);
        cart.add(&product);
        cart.add(&product);

        assert_eq!(cart.remove(ProductId::new(1)), 2);
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), "0.00");
    }

    #[test]
    fn test_remove_twice_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 1000));
        cart.add(&test_product(2, 250));

        cart.remove(ProductId::new(1));
        let after_first = cart.count();
        assert_eq!(cart.remove(ProductId::new(1)), 0);
        assert_eq!(cart.count(), after_first);
        assert_eq!(cart.total(), "2.50");
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 1234));

        assert_eq!(cart.remove(ProductId::new(99)), 0);
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.total(), "12.34");
    }

    #[test]
    fn test_remove_keeps_order_of_remaining_slots() {
        let mut cart = Cart::new();
        for id in [3, 1, 2, 1, 4] {
            cart.add(&test_product(id, 100));
        }

        cart.remove(ProductId::new(1));

        let ids: Vec<u64> = cart.entries().iter().map(|e| e.product_id().get()).collect();
        assert_eq!(ids, vec![3, 2, 4]);
    }

    #[test]
    fn test_remove_entry_drops_one_slot() {
        let mut cart = Cart::new();
        let product = test_product(1, 1000);
        cart.add(&product);
        cart.add(&product);

        let first = cart.entries()[0].entry_id;
        assert!(cart.remove_entry(first));
        assert!(!cart.remove_entry(first));
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.total(), "10.00");
    }

    #[test]
    fn test_price_is_frozen_at_add() {
        let mut cart = Cart::new();
        let mut product = test_product(1, 1000);
        cart.add(&product);

        product.price = Money::from_cents(5000);
        cart.add(&product);

        assert_eq!(cart.total(), "60.00");
        assert_eq!(cart.entries()[0].price().cents(), 1000);
    }

    #[test]
    fn test_summary() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 999));

        let summary = cart.summary();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.total, "9.99");

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json, serde_json::json!({ "count": 1, "total": "9.99" }));
    }

    #[test]
    fn test_oversized_wire_price_never_reaches_cart() {
        let ok = r#"{"id":1,"title":"x","price":5.0}"#;
        assert!(serde_json::from_str::<Product>(ok).is_ok());

        let huge = r#"{"id":1,"title":"x","price":50000000000000000.0}"#;
        assert!(serde_json::from_str::<Product>(huge).is_err());
    }

    #[test]
    fn test_total_of_max_prices_is_exact() {
        let mut cart = Cart::new();
        let product = Product {
            price: Money::MAX_PRICE,
            ..test_product(1, 0)
        };
        cart.add(&product);
        cart.add(&product);

        assert_eq!(cart.total_amount().cents(), Money::MAX_PRICE.cents() * 2);
        assert_eq!(cart.total(), "18446744073709.54");
    }

    proptest! {
        #[test]
        fn prop_count_and_total_match_adds(
            adds in prop::collection::vec((1u64..20, 0i64..10_000_000), 0..50)
        ) {
            let mut cart = Cart::new();
            for (id, cents) in &adds {
                cart.add(&test_product(*id, *cents));
            }

            let sum: i64 = adds.iter().map(|(_, cents)| cents).sum();
            prop_assert_eq!(cart.count(), adds.len());
            prop_assert_eq!(cart.total(), Money::from_cents(sum).to_decimal_string());
        }

        #[test]
        fn prop_remove_twice_is_idempotent(
            adds in prop::collection::vec((1u64..10, 0i64..100_000), 0..30),
            target in 1u64..10
        ) {
            let mut cart = Cart::new();
            for (id, cents) in &adds {
                cart.add(&test_product(*id, *cents));
            }

            let removed = cart.remove(ProductId::new(target));
            let (count, total) = (cart.count(), cart.total());

            prop_assert_eq!(removed, adds.iter().filter(|(id, _)| *id == target).count());
            prop_assert_eq!(cart.remove(ProductId::new(target)), 0);
            prop_assert_eq!(cart.count(), count);
            prop_assert_eq!(cart.total(), total);
        }

        #[test]
        fn prop_removing_absent_id_changes_nothing(
            adds in prop::collection::vec((1u64..10, 0i64..100_000), 0..30),
            absent in 10u64..1_000
        ) {
            let mut cart = Cart::new();
            for (id, cents) in &adds {
                cart.add(&test_product(*id, *cents));
            }
            let (count, total) = (cart.count(), cart.total());

            prop_assert_eq!(cart.remove(ProductId::new(absent)), 0);
            prop_assert_eq!(cart.count(), count);
            prop_assert_eq!(cart.total(), total);
        }
    }
}
