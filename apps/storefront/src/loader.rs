//! # Category Loader
//!
//! Fetches category collections and single items from the catalog store.
//!
//! ## Failure Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load(category)                                                         │
//! │     store Ok(items)  ──► items, each tagged with `category`            │
//! │     store Err(e)     ──► warn!(category, error) ──► []                 │
//! │                                                                         │
//! │  load_one(kind, id)                                                     │
//! │     store Ok(Some)   ──► ItemLookup::Found                             │
//! │     store Ok(None)   ──► ItemLookup::NotFound                          │
//! │     store Err(e)     ──► warn!  ──► ItemLookup::Unavailable            │
//! │     generic kind     ──► ItemLookup::NotFound (no table to ask)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retries; a failed category stays empty until the next refresh.

use std::sync::Arc;

use duka_core::{CatalogItem, Category, CoreError, CoreResult, ItemAddress, ItemId, ItemKind};
use tracing::{debug, warn};

use crate::store::CatalogStore;

/// Outcome of a single-item fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemLookup {
    Found(CatalogItem),
    /// The store answered and has no such item.
    NotFound,
    /// The store could not answer.
    Unavailable,
}

impl ItemLookup {
    /// True for both `NotFound` and `Unavailable`; the product view shows the
    /// same "not found" state for either.
    pub fn is_missing(&self) -> bool {
        !matches!(self, ItemLookup::Found(_))
    }

    pub fn item(&self) -> Option<&CatalogItem> {
        match self {
            ItemLookup::Found(item) => Some(item),
            _ => None,
        }
    }

    /// Collapses both missing states into [`CoreError::ItemNotFound`].
    pub fn into_result(self, address: ItemAddress) -> CoreResult<CatalogItem> {
        match self {
            ItemLookup::Found(item) => Ok(item),
            ItemLookup::NotFound | ItemLookup::Unavailable => Err(CoreError::ItemNotFound(address)),
        }
    }
}

/// Loads collections from a [`CatalogStore`], never propagating list errors.
#[derive(Clone)]
pub struct CategoryLoader {
    store: Arc<dyn CatalogStore>,
}

impl CategoryLoader {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        CategoryLoader { store }
    }

    /// Loads one category's collection in store order.
    ///
    /// Returns an empty collection when the fetch fails.
    pub async fn load(&self, category: Category) -> Vec<CatalogItem> {
        match self.store.fetch_category(category).await {
            Ok(items) => {
                debug!(category = %category, count = items.len(), "Category loaded");
                items
                    .into_iter()
                    .map(|mut item| {
                        item.category = category;
                        item
                    })
                    .collect()
            }
            Err(e) => {
                warn!(category = %category, error = %e, "Category fetch failed, showing it empty");
                Vec::new()
            }
        }
    }

    /// Loads a single item for the product detail view.
    pub async fn load_one(&self, kind: ItemKind, id: ItemId) -> ItemLookup {
        let Some(category) = kind.category() else {
            debug!(kind = %kind, id = %id, "No store table for item kind");
            return ItemLookup::NotFound;
        };

        match self.store.fetch_item(category, id).await {
            Ok(Some(mut item)) => {
                item.category = category;
                ItemLookup::Found(item)
            }
            Ok(None) => {
                debug!(category = %category, id = %id, "Item not found");
                ItemLookup::NotFound
            }
            Err(e) => {
                warn!(category = %category, id = %id, error = %e, "Item fetch failed");
                ItemLookup::Unavailable
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
