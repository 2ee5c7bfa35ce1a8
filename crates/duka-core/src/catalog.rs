//! # Catalog Module
//!
//! Holds one item collection per category and answers cross-category search.
//!
//! ## Search Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  search(catalog, "screen")                                              │
//! │                                                                         │
//! │  phone_repairs   [iPhone Screen, Battery]      ──► [iPhone Screen]      │
//! │  laptop_repairs  [Laptop Screen, Keyboard]     ──► [Laptop Screen]      │
//! │  accessories     [Screen Protector]            ──► [Screen Protector]   │
//! │  refurbished     [HP EliteBook]                ──► []                   │
//! │                                                                         │
//! │  result = phone ++ laptop ++ accessories ++ refurbished                │
//! │         = [iPhone Screen, Laptop Screen, Screen Protector]             │
//! │                                                                         │
//! │  • empty / whitespace query → []  (search is opt-in)                   │
//! │  • case-insensitive substring match on name                            │
//! │  • grouped by category, never interleaved or ranked                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is a pure function of its arguments; the storefront
//! decides when to call it again.

use serde::{Deserialize, Serialize};

use crate::types::{CatalogItem, Category, ItemId};

/// The four per-category collections, as currently held.
///
/// Collections are replaced independently; a `Catalog` makes no promise that
/// they were fetched at the same moment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    collections: [Vec<CatalogItem>; 4],
}

impl Catalog {
    /// Creates a catalog with all four collections empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces one category's collection, keeping the given order.
    pub fn set(&mut self, category: Category, items: Vec<CatalogItem>) {
        self.collections[category.index()] = items;
    }

    /// Builder form of [`Catalog::set`].
    pub fn with(mut self, category: Category, items: Vec<CatalogItem>) -> Self {
        self.set(category, items);
        self
    }

    /// Items currently held for a category.
    pub fn items(&self, category: Category) -> &[CatalogItem] {
        &self.collections[category.index()]
    }

    /// Checks whether a category's collection holds an item with this id.
    pub fn contains(&self, category: Category, id: ItemId) -> bool {
        self.items(category).iter().any(|item| item.id == id)
    }

    /// Looks up an item by category and id.
    pub fn get(&self, category: Category, id: ItemId) -> Option<&CatalogItem> {
        self.items(category).iter().find(|item| item.id == id)
    }

    /// Total number of items across all categories.
    pub fn len(&self) -> usize {
        self.collections.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.iter().all(Vec::is_empty)
    }

    /// Iterates `(category, items)` in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[CatalogItem])> {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.items(category)))
    }

    /// See [`search`].
    pub fn search(&self, query: &str) -> Vec<CatalogItem> {
        search(self, query)
    }
}

/// Normalizes a raw query into its matching form.
///
/// Returns `None` for an empty or whitespace-only query. Otherwise the whole
/// query is lowercased, surrounding spaces included, so `" screen"` only
/// matches names with a word before "screen".
pub fn normalize_query(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

/// Finds items whose name contains `query`, case-insensitively.
///
/// Results are grouped by category in priority order, each group keeping its
/// collection's order.
///
/// ```rust
/// use duka_core::{search, Catalog, CatalogItem, Category, ItemId, Money};
///
/// let catalog = Catalog::new()
///     .with(Category::Accessories, vec![
///         CatalogItem::new(ItemId::new(1), "Screen Protector", Money::from_shillings(300), Category::Accessories),
///     ])
///     .with(Category::PhoneRepair, vec![
///         CatalogItem::new(ItemId::new(1), "iPhone Screen", Money::from_shillings(4500), Category::PhoneRepair),
///     ]);
///
/// let names: Vec<String> = search(&catalog, "SCREEN").into_iter().map(|i| i.name).collect();
/// assert_eq!(names, ["iPhone Screen", "Screen Protector"]);
/// assert!(search(&catalog, "   ").is_empty());
/// ```
pub fn search(catalog: &Catalog, query: &str) -> Vec<CatalogItem> {
    let Some(needle) = normalize_query(query) else {
        return Vec::new();
    };

    catalog
        .iter()
        .flat_map(|(_, items)| items.iter())
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
