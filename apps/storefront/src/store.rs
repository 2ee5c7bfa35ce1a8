//! # Catalog Store Seam
//!
//! The read-only query interface the storefront needs from its backing
//! store: every row of a category, or one row by id.
//!
//! ```text
//! CategoryLoader ──► Arc<dyn CatalogStore>
//!                         │
//!                         ├── CatalogRepository (SQLite, duka-db)
//!                         └── MemoryStore       (tests)
//! ```

use async_trait::async_trait;
use duka_core::{CatalogItem, Category, ItemId};
use duka_db::CatalogRepository;

use crate::error::StoreError;

/// Read-only access to the per-category catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All items of a category, ascending by id.
    async fn fetch_category(&self, category: Category) -> Result<Vec<CatalogItem>, StoreError>;

    /// At most one item.
    async fn fetch_item(&self, category: Category, id: ItemId) -> Result<Option<CatalogItem>, StoreError>;
}

#[async_trait]
impl CatalogStore for CatalogRepository {
    async fn fetch_category(&self, category: Category) -> Result<Vec<CatalogItem>, StoreError> {
        Ok(self.list(category).await?)
    }

    async fn fetch_item(&self, category: Category, id: ItemId) -> Result<Option<CatalogItem>, StoreError> {
        Ok(self.get(category, id).await?)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use duka_core::Money;
    use duka_db::{Database, DbConfig, NewCatalogItem};

    #[tokio::test]
    async fn test_repository_is_a_catalog_store() {
        let db = Database::open(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();
        repo.insert(
            Category::Accessories,
            &NewCatalogItem::new("USB-C Cable", Money::from_shillings(500)),
        )
        .await
        .unwrap();

        let store: &dyn CatalogStore = &repo;
        let items = store.fetch_category(Category::Accessories).await.unwrap();
        assert_eq!(items.len(), 1);

        let missing = store.fetch_item(Category::Accessories, ItemId::new(2)).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_closed_database_surfaces_store_error() {
        let db = Database::open(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();
        db.close().await;

        let err = repo.fetch_category(Category::PhoneRepair).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }
}
