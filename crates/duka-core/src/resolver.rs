//! # Type Resolver
//!
//! Works out which category an item came from by checking which held
//! collection contains its id.
//!
//! ```text
//! resolve_type(item { id: 7 })
//!
//!   phone_repairs  contains 7? ── no
//!   laptop_repairs contains 7? ── no
//!   accessories    contains 7? ── YES ──► accessories   (stop here)
//!   refurbished    contains 7?            (never asked)
//!
//!   nobody contains it ──► "products" (generic fallback)
//! ```
//!
//! Ids are only unique per category, so an id held by two collections always
//! resolves to the higher-priority one.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::types::{CatalogItem, Category};
use crate::GENERIC_PRODUCT_KIND;

/// Result of type resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Found in this category's collection.
    Category(Category),
    /// No held collection contains the id.
    GenericProduct,
}

impl ItemKind {
    /// Type segment used in product routes (`phone_repairs`, ..., `products`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Category(category) => category.table(),
            ItemKind::GenericProduct => GENERIC_PRODUCT_KIND,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            ItemKind::Category(category) => Some(*category),
            ItemKind::GenericProduct => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the category of `item` by id membership, in priority order.
pub fn resolve_type(catalog: &Catalog, item: &CatalogItem) -> ItemKind {
    Category::ALL
        .into_iter()
        .find(|category| catalog.contains(*category, item.id))
        .map_or(ItemKind::GenericProduct, ItemKind::Category)
}

impl Catalog {
    /// See [`resolve_type`].
    pub fn resolve_type(&self, item: &CatalogItem) -> ItemKind {
        resolve_type(self, item)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::ItemId;

    fn item(category: Category, id: i64, name: &str) -> CatalogItem {
        CatalogItem::new(ItemId::new(id), name, Money::from_shillings(1000), category)
    }

    #[test]
    fn test_resolves_single_membership() {
        let catalog = Catalog::new()
            .with(Category::PhoneRepair, vec![item(Category::PhoneRepair, 1, "Battery")])
            .with(Category::Refurbished, vec![item(Category::Refurbished, 9, "Dell Latitude")]);

        let laptop = item(Category::Refurbished, 9, "Dell Latitude");
        assert_eq!(
            catalog.resolve_type(&laptop),
            ItemKind::Category(Category::Refurbished)
        );
    }

    #[test]
    fn test_id_collision_prefers_higher_priority() {
        let catalog = Catalog::new()
            .with(Category::Accessories, vec![item(Category::Accessories, 5, "Charger")])
            .with(Category::Refurbished, vec![item(Category::Refurbished, 5, "Galaxy S10")]);

        // The refurbished item's own tag loses to membership order.
        let galaxy = item(Category::Refurbished, 5, "Galaxy S10");
        for _ in 0..3 {
            assert_eq!(
                resolve_type(&catalog, &galaxy),
                ItemKind::Category(Category::Accessories)
            );
        }
    }

    #[test]
    fn test_phone_repairs_win_over_everything() {
        let catalog = Catalog::new()
            .with(Category::PhoneRepair, vec![item(Category::PhoneRepair, 1, "Screen")])
            .with(Category::LaptopRepair, vec![item(Category::LaptopRepair, 1, "Hinge")])
            .with(Category::Accessories, vec![item(Category::Accessories, 1, "Cable")]);

        let cable = item(Category::Accessories, 1, "Cable");
        assert_eq!(
            catalog.resolve_type(&cable),
            ItemKind::Category(Category::PhoneRepair)
        );
    }

    #[test]
    fn test_unknown_id_falls_back_to_generic() {
        let catalog = Catalog::new()
            .with(Category::Accessories, vec![item(Category::Accessories, 1, "Cable")]);

        let stray = item(Category::Accessories, 404, "Removed item");
        let kind = catalog.resolve_type(&stray);

        assert_eq!(kind, ItemKind::GenericProduct);
        assert_eq!(kind.as_str(), "products");
        assert_eq!(kind.category(), None);
    }

    #[test]
    fn test_kind_route_segment() {
        assert_eq!(
            ItemKind::Category(Category::LaptopRepair).to_string(),
            "laptop_repairs"
        );
    }
}
