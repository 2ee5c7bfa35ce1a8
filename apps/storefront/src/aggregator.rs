//! # Catalog Aggregator
//!
//! Runs the four category loads, holds what they return, and answers search
//! queries across all of them.
//!
//! ## Refresh and Publish
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  refresh_all()                                                          │
//! │                                                                         │
//! │   tokio::join!( phone ─┐  laptop ─┐  accessories ─┐  refurbished ─┐ )   │
//! │                        │          │               │               │     │
//! │           settles ─────┘          │               │               │     │
//! │           set_collection(phone)   │               │               │     │
//! │                 watch ──► Catalog │               │               │     │
//! │                                   ▼               ▼               ▼     │
//! │                        each publishes as it settles; no barrier        │
//! │                                                                         │
//! │  set_query("screen") ─► watch ──► query                                │
//! │                                                                         │
//! │  SearchWatcher: changed() on either channel ─► search(catalog, query)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads between refreshes see whatever each collection last published.

use duka_core::{search, CatalogItem, Catalog, Category, ItemKind};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::loader::CategoryLoader;

/// Holds the per-category collections and the current search query.
pub struct CatalogAggregator {
    loader: CategoryLoader,
    catalog: watch::Sender<Catalog>,
    query: watch::Sender<String>,
}

impl CatalogAggregator {
    pub fn new(loader: CategoryLoader) -> Self {
        let (catalog, _) = watch::channel(Catalog::new());
        let (query, _) = watch::channel(String::new());

        CatalogAggregator {
            loader,
            catalog,
            query,
        }
    }

    /// Loads all four categories concurrently.
    ///
    /// Each collection is published the moment its own load settles. A failed
    /// load publishes an empty collection and does not affect the others.
    pub async fn refresh_all(&self) {
        info!("Refreshing all catalog categories");

        let publish = |category: Category| async move {
            let items = self.loader.load(category).await;
            self.set_collection(category, items);
        };

        tokio::join!(
            publish(Category::PhoneRepair),
            publish(Category::LaptopRepair),
            publish(Category::Accessories),
            publish(Category::Refurbished),
        );

        info!(items = self.catalog.borrow().len(), "Catalog refresh complete");
    }

    /// Reloads a single category.
    pub async fn refresh(&self, category: Category) {
        let items = self.loader.load(category).await;
        self.set_collection(category, items);
    }

    /// Replaces one collection and notifies watchers.
    pub fn set_collection(&self, category: Category, items: Vec<CatalogItem>) {
        debug!(category = %category, count = items.len(), "Publishing collection");
        self.catalog.send_modify(|catalog| catalog.set(category, items));
    }

    /// Sets the search query and notifies watchers.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        debug!(query = %query, "Search query changed");
        self.query.send_replace(query);
    }

    pub fn query(&self) -> String {
        self.query.borrow().clone()
    }

    /// Results for the current query against the current collections.
    pub fn results(&self) -> Vec<CatalogItem> {
        search(&self.catalog.borrow(), &self.query.borrow())
    }

    /// Items currently held for one category, in store order.
    pub fn items(&self, category: Category) -> Vec<CatalogItem> {
        self.catalog.borrow().items(category).to_vec()
    }

    /// Category of `item` by membership in the held collections.
    pub fn resolve_type(&self, item: &CatalogItem) -> ItemKind {
        self.catalog.borrow().resolve_type(item)
    }

    /// Copy of every held collection.
    pub fn snapshot(&self) -> Catalog {
        self.catalog.borrow().clone()
    }

    /// Subscribes to search results.
    pub fn watch(&self) -> SearchWatcher {
        SearchWatcher {
            catalog: self.catalog.subscribe(),
            query: self.query.subscribe(),
        }
    }
}

/// Re-runs the search whenever the query or any collection changes.
pub struct SearchWatcher {
    catalog: watch::Receiver<Catalog>,
    query: watch::Receiver<String>,
}

impl SearchWatcher {
    /// Results for the latest values, marking both as seen.
    pub fn current(&mut self) -> Vec<CatalogItem> {
        let catalog = self.catalog.borrow_and_update();
        let query = self.query.borrow_and_update();
        search(&catalog, &query)
    }

    /// Waits for the next change and returns the recomputed results.
    ///
    /// `None` once the aggregator is gone.
    pub async fn changed(&mut self) -> Option<Vec<CatalogItem>> {
        tokio::select! {
            res = self.catalog.changed() => res.ok()?,
            res = self.query.changed() => res.ok()?,
        }
        Some(self.current())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use duka_core::{ItemId, Money};
    use std::sync::Arc;

    fn item(category: Category, id: i64, name: &str) -> CatalogItem {
        CatalogItem::new(ItemId::new(id), name, Money::from_shillings(500), category)
    }

    fn full_store() -> MemoryStore {
        MemoryStore::new()
            .with(
                Category::PhoneRepair,
                vec![item(Category::PhoneRepair, 1, "iPhone Screen Replacement")],
            )
            .with(
                Category::LaptopRepair,
                vec![item(Category::LaptopRepair, 1, "Laptop Screen Repair")],
            )
            .with(
                Category::Accessories,
                vec![
                    item(Category::Accessories, 1, "USB-C Cable"),
                    item(Category::Accessories, 2, "Screen Protector"),
                ],
            )
            .with(
                Category::Refurbished,
                vec![item(Category::Refurbished, 2, "HP EliteBook 840")],
            )
    }

    fn aggregator(store: MemoryStore) -> CatalogAggregator {
        CatalogAggregator::new(CategoryLoader::new(Arc::new(store)))
    }

    fn names(items: &[CatalogItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_refresh_all_then_search() {
        let aggregator = aggregator(full_store());
        aggregator.refresh_all().await;

        assert_eq!(aggregator.snapshot().len(), 5);

        aggregator.set_query("SCREEN");
        assert_eq!(
            names(&aggregator.results()),
            vec!["iPhone Screen Replacement", "Laptop Screen Repair", "Screen Protector"]
        );

        aggregator.set_query("   ");
        assert!(aggregator.results().is_empty());
    }

    #[tokio::test]
    async fn test_one_failing_category_leaves_others_populated() {
        let aggregator = aggregator(full_store().failing(Category::LaptopRepair));
        aggregator.refresh_all().await;

        assert!(aggregator.items(Category::LaptopRepair).is_empty());
        assert_eq!(aggregator.items(Category::PhoneRepair).len(), 1);
        assert_eq!(aggregator.items(Category::Accessories).len(), 2);
        assert_eq!(aggregator.items(Category::Refurbished).len(), 1);

        aggregator.set_query("screen");
        assert_eq!(
            names(&aggregator.results()),
            vec!["iPhone Screen Replacement", "Screen Protector"]
        );
    }

    #[tokio::test]
    async fn test_collections_publish_without_barrier() {
        let mut store = full_store();
        let gate = store.hold(Category::Refurbished);
        let aggregator = Arc::new(aggregator(store));

        let mut watcher = aggregator.watch();
        aggregator.set_query("e");
        watcher.current();

        let refresh = tokio::spawn({
            let aggregator = aggregator.clone();
            async move { aggregator.refresh_all().await }
        });

        // Wait until the three unheld categories are visible
        while aggregator.items(Category::Accessories).is_empty()
            || aggregator.items(Category::PhoneRepair).is_empty()
            || aggregator.items(Category::LaptopRepair).is_empty()
        {
            watcher.changed().await.unwrap();
        }
        assert!(aggregator.items(Category::Refurbished).is_empty());

        gate.notify_one();
        refresh.await.unwrap();
        assert_eq!(aggregator.items(Category::Refurbished).len(), 1);
    }

    #[tokio::test]
    async fn test_watcher_recomputes_on_query_change() {
        let aggregator = aggregator(full_store());
        aggregator.refresh_all().await;

        let mut watcher = aggregator.watch();
        assert!(watcher.current().is_empty());

        aggregator.set_query("cable");
        let results = watcher.changed().await.unwrap();
        assert_eq!(names(&results), vec!["USB-C Cable"]);
    }

    #[tokio::test]
    async fn test_watcher_recomputes_on_collection_change() {
        let aggregator = aggregator(MemoryStore::new());
        aggregator.set_query("charger");

        let mut watcher = aggregator.watch();
        assert!(watcher.current().is_empty());

        aggregator.set_collection(
            Category::Accessories,
            vec![item(Category::Accessories, 7, "Samsung 25W Charger")],
        );
        let results = watcher.changed().await.unwrap();
        assert_eq!(names(&results), vec!["Samsung 25W Charger"]);
    }

    #[tokio::test]
    async fn test_watcher_ends_with_aggregator() {
        let aggregator = aggregator(MemoryStore::new());
        let mut watcher = aggregator.watch();
        drop(aggregator);

        assert!(watcher.changed().await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_type_uses_held_collections() {
        let aggregator = aggregator(full_store());
        aggregator.refresh_all().await;

        // id 2 lives in both accessories and refurbished
        let laptop = item(Category::Refurbished, 2, "HP EliteBook 840");
        assert_eq!(
            aggregator.resolve_type(&laptop),
            ItemKind::Category(Category::Accessories)
        );

        let stray = item(Category::Refurbished, 99, "Sold out");
        assert_eq!(aggregator.resolve_type(&stray), ItemKind::GenericProduct);
    }

    #[tokio::test]
    async fn test_refresh_single_category() {
        let aggregator = aggregator(full_store());
        aggregator.refresh(Category::Accessories).await;

        assert_eq!(aggregator.items(Category::Accessories).len(), 2);
        assert!(aggregator.items(Category::PhoneRepair).is_empty());
    }
}
