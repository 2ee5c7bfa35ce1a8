//! # Cart
//!
//! An ordered list of item snapshots.
//!
//! ## Positional, Not Quantitative
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add(cable) ; add(cable) ; add(protector)                               │
//! │                                                                         │
//! │   index │ entry                                                         │
//! │  ───────┼─────────────────────────                                      │
//! │     0   │ USB-C Cable       500   ◄─┐ two independent entries,         │
//! │     1   │ USB-C Cable       500   ◄─┘ NOT one entry at quantity 2      │
//! │     2   │ Screen Protector  300                                         │
//! │                                                                         │
//! │  remove(0) ──► [USB-C Cable 500, Screen Protector 300]                  │
//! │               later entries shift down by one, nothing else changes     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entries are full copies of the catalog item taken when `add` was called,
//! so later catalog refreshes never change what is in the cart.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::CatalogItem;

/// One cart entry: a frozen snapshot of a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// The item exactly as it was when added.
    pub item: CatalogItem,
}

impl CartItem {
    /// Snapshots an item.
    pub fn from_item(item: &CatalogItem) -> Self {
        CartItem { item: item.clone() }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.item.name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.item.price
    }

    /// Thumbnail shown in the cart view.
    pub fn thumbnail(&self) -> Option<&str> {
        self.item.primary_image()
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Entries keep insertion order, except where a removal closed a gap
/// - `total()` is always the sum of entry prices
/// - No dedup and no quantity: every `add` is one more entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Appends a snapshot of `item` and returns the new entry's index.
    ///
    /// Always succeeds; price and name are not checked here.
    pub fn add(&mut self, item: &CatalogItem) -> usize {
        self.items.push(CartItem::from_item(item));
        self.items.len() - 1
    }

    /// Removes the entry at `index`.
    ///
    /// Returns `None` and leaves the cart untouched when `index` is out of
    /// range.
    pub fn remove(&mut self, index: usize) -> Option<CartItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of the prices of all current entries, saturating rather than
    /// overflowing.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::price).sum()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&CartItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Summary for views.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

/// Cart summary for API responses and badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.len(),
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
    use crate::money::MAX_PRICE;
    use crate::types::{Category, ItemId};
    use proptest::prelude::*;

    fn product(id: i64, name: &str, shillings: i64) -> CatalogItem {
        CatalogItem::new(
            ItemId::new(id),
            name,
            Money::from_shillings(shillings),
            Category::Accessories,
        )
    }

    fn names(cart: &Cart) -> Vec<&str> {
        cart.items().iter().map(CartItem::name).collect()
    }

    #[test]
    fn test_add_same_item_twice_makes_two_entries() {
        let mut cart = Cart::new();
        let cable = product(1, "USB-C Cable", 500);

        assert_eq!(cart.add(&cable), 0);
        assert_eq!(cart.add(&cable), 1);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].item, cart.items()[1].item);
        assert_eq!(cart.total(), Money::from_shillings(1000));
    }

    #[test]
    fn test_total_sums_prices() {
        let mut cart = Cart::new();
        cart.add(&product(1, "USB-C Cable", 500));
        cart.add(&product(2, "Screen Protector", 300));

        assert_eq!(cart.total(), Money::from_shillings(800));
        assert_eq!(
            cart.totals(),
            CartTotals {
                item_count: 2,
                total: Money::from_shillings(800)
            }
        );
    }

    #[test]
    fn test_remove_shifts_later_entries() {
        let mut cart = Cart::new();
        cart.add(&product(1, "A", 100));
        cart.add(&product(2, "B", 200));
        cart.add(&product(3, "C", 300));

        let removed = cart.remove(1).unwrap();
        assert_eq!(removed.name(), "B");
        assert_eq!(names(&cart), vec!["A", "C"]);
        assert_eq!(cart.total(), Money::from_shillings(400));
    }

    #[test]
    fn test_remove_duplicate_removes_exactly_one_occurrence() {
        let mut cart = Cart::new();
        let cable = product(1, "USB-C Cable", 500);
        cart.add(&cable);
        cart.add(&product(2, "Charger", 900));
        cart.add(&cable);

        cart.remove(2);
        assert_eq!(names(&cart), vec!["USB-C Cable", "Charger"]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product(1, "A", 100));

        assert!(cart.remove(1).is_none());
        assert!(cart.remove(usize::MAX).is_none());
        assert_eq!(names(&cart), vec!["A"]);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&product(1, "A", 100));
        cart.clear();

        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_total_of_largest_prices_does_not_overflow() {
        let mut cart = Cart::new();
        let priciest = CatalogItem::new(ItemId::new(1), "Server Rack", MAX_PRICE, Category::Refurbished);
        let unbounded = CatalogItem::new(
            ItemId::new(2),
            "Mispriced",
            Money::from_cents(i64::MAX),
            Category::Refurbished,
        );

        cart.add(&priciest);
        cart.add(&priciest);
        assert_eq!(cart.total().cents(), MAX_PRICE.cents() * 2);

        cart.add(&unbounded);
        cart.add(&unbounded);
        assert_eq!(cart.total().cents(), i64::MAX);
        assert_eq!(cart.totals().item_count, 4);
    }

    #[test]
    fn test_entries_are_snapshots() {
        let mut cart = Cart::new();
        let mut charger = product(4, "Charger", 900);
        cart.add(&charger);

        charger.price = Money::from_shillings(1500);
        charger.name = "Fast Charger".to_string();

        assert_eq!(cart.items()[0].name(), "Charger");
        assert_eq!(cart.total(), Money::from_shillings(900));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(i64),
        Remove(usize),
        Clear,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0i64..100_000).prop_map(Op::Add),
            3 => (0usize..12).prop_map(Op::Remove),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn prop_total_matches_entries(ops in proptest::collection::vec(op_strategy(), 0..60)) {
            let mut cart = Cart::new();
            let mut expected: Vec<i64> = Vec::new();

            for (n, op) in ops.into_iter().enumerate() {
                match op {
                    Op::Add(cents) => {
                        let item = CatalogItem::new(
                            ItemId::new(n as i64),
                            format!("item-{}", n),
                            Money::from_cents(cents),
                            Category::Refurbished,
                        );
                        cart.add(&item);
                        expected.push(cents);
                    }
                    Op::Remove(index) => {
                        let removed = cart.remove(index);
                        if index < expected.len() {
                            prop_assert_eq!(removed.map(|e| e.price().cents()), Some(expected.remove(index)));
                        } else {
                            prop_assert!(removed.is_none());
                        }
                    }
                    Op::Clear => {
                        cart.clear();
                        expected.clear();
                    }
                }

                let prices: Vec<i64> = cart.items().iter().map(|e| e.price().cents()).collect();
                prop_assert_eq!(&prices, &expected);
                prop_assert_eq!(cart.total().cents(), expected.iter().sum::<i64>());
            }
        }
    }
}
