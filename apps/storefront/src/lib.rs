//! # Duka Storefront
//!
//! The storefront session: loads the catalog, answers search, keeps the
//! cart and hands orders to the messaging endpoint.
//!
//! ## Module Organization
//! ```text
//! duka_storefront/
//! ├── lib.rs          ◄─── You are here (session + tracing setup)
//! ├── config.rs       ◄─── storefront.toml + DUKA_* environment
//! ├── store.rs        ◄─── CatalogStore trait (SQLite repo, test double)
//! ├── loader.rs       ◄─── CategoryLoader, ItemLookup
//! ├── aggregator.rs   ◄─── CatalogAggregator, SearchWatcher
//! ├── navigation.rs   ◄─── Route
//! ├── state/          ◄─── CartState
//! └── error.rs        ◄─── ConfigError, StoreError, StorefrontError
//! ```
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront::open(&config)                                             │
//! │     │  Database::open ──► CatalogRepository as Arc<dyn CatalogStore>    │
//! │     ▼                                                                   │
//! │  load_catalog()      four concurrent loads, each published on settle   │
//! │     ▼                                                                   │
//! │  search / listing / view_product / add_to_cart / remove_from_cart      │
//! │     ▼                                                                   │
//! │  checkout_url()      None while the cart is empty                      │
//! │     ▼                                                                   │
//! │  drop                cart discarded with the session                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod aggregator;
pub mod config;
pub mod error;
pub mod loader;
pub mod navigation;
pub mod state;
pub mod store;

use std::sync::Arc;

use duka_core::checkout::Inquiry;
use duka_core::{CatalogItem, Category, ItemAddress, ItemId, ItemKind, MessagingEndpoint, ValidationError};
use duka_db::{Database, DbConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use url::Url;
use uuid::Uuid;

pub use aggregator::{CatalogAggregator, SearchWatcher};
pub use config::StorefrontConfig;
pub use error::{ConfigError, StoreError, StorefrontError, StorefrontResult};
pub use loader::{CategoryLoader, ItemLookup};
pub use navigation::Route;
pub use state::CartState;
pub use store::CatalogStore;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=duka_storefront=trace` - Trace for the storefront only
/// - Default: `info,duka=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,duka=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}

/// One visitor session.
pub struct Storefront {
    session_id: Uuid,
    loader: CategoryLoader,
    aggregator: CatalogAggregator,
    cart: CartState,
    endpoint: MessagingEndpoint,
}

impl Storefront {
    /// Creates a session over any catalog store.
    pub fn new(store: Arc<dyn CatalogStore>, endpoint: MessagingEndpoint) -> Self {
        let loader = CategoryLoader::new(store);
        let session_id = Uuid::new_v4();
        info!(%session_id, "Storefront session started");

        Storefront {
            session_id,
            aggregator: CatalogAggregator::new(loader.clone()),
            loader,
            cart: CartState::new(),
            endpoint,
        }
    }

    /// Opens the SQLite catalog named by `config` and creates a session over it.
    pub async fn open(config: &StorefrontConfig) -> StorefrontResult<Self> {
        let endpoint = config.messaging_endpoint()?;

        let db_path = config.database_path();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let db = Database::open(
            DbConfig::new(db_path).max_connections(config.database.max_connections),
        )
        .await?;

        if !db.health_check().await {
            return Err(StoreError::Unavailable("catalog database did not answer".into()).into());
        }

        Ok(Self::new(Arc::new(db.catalog()), endpoint))
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn aggregator(&self) -> &CatalogAggregator {
        &self.aggregator
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn endpoint(&self) -> &MessagingEndpoint {
        &self.endpoint
    }

    /// Loads every category; failed ones stay empty.
    pub async fn load_catalog(&self) {
        debug!(session_id = %self.session_id, "Loading catalog");
        self.aggregator.refresh_all().await;
    }

    /// Sets the search query and returns its results.
    pub fn search(&self, query: &str) -> Vec<CatalogItem> {
        self.aggregator.set_query(query);
        self.aggregator.results()
    }

    /// Items of one category listing.
    pub fn listing(&self, category: Category) -> Vec<CatalogItem> {
        self.aggregator.items(category)
    }

    /// Route to an item's detail page, resolving its kind against the
    /// held collections.
    pub fn route_for(&self, item: &CatalogItem) -> Route {
        Route::product(self.aggregator.resolve_type(item), item)
    }

    /// Fetches the item behind a product route.
    pub async fn view_product(&self, kind: ItemKind, id: ItemId) -> ItemLookup {
        debug!(session_id = %self.session_id, %kind, %id, "Viewing product");
        self.loader.load_one(kind, id).await
    }

    /// Resolves a product route to its item.
    ///
    /// ## Errors
    /// * `Validation` - not a product route, or a kind with no catalog table
    /// * `Core(ItemNotFound)` - the store has no such item
    /// * `Store(Unavailable)` - the store could not answer
    pub async fn product(&self, route: &Route) -> StorefrontResult<CatalogItem> {
        let Route::Product { kind, id } = *route else {
            return Err(route_error(route, "is not a product page"));
        };
        let Some(category) = kind.category() else {
            return Err(route_error(route, "has no catalog table"));
        };

        match self.view_product(kind, id).await {
            ItemLookup::Unavailable => {
                Err(StoreError::Unavailable(format!("could not fetch {}", route)).into())
            }
            lookup => Ok(lookup.into_result(ItemAddress::new(category, id))?),
        }
    }

    pub fn add_to_cart(&self, item: &CatalogItem) -> usize {
        self.cart.add(item)
    }

    /// Out-of-range indices are ignored.
    pub fn remove_from_cart(&self, index: usize) {
        self.cart.remove(index);
    }

    /// Messaging link carrying the order, `None` while the cart is empty.
    pub fn checkout_url(&self) -> Option<Url> {
        let url = self.cart.with_cart(|cart| self.endpoint.checkout_url(cart));
        if url.is_some() {
            info!(session_id = %self.session_id, totals = ?self.cart.totals(), "Checkout link built");
        }
        url
    }

    /// "Talk to Us" link for repair services, "Ask Questions" link for goods.
    pub fn inquiry_url(&self, item: &CatalogItem) -> Url {
        let inquiry = if item.category.is_repair_service() {
            Inquiry::RepairHelp(item)
        } else {
            Inquiry::Question(item)
        };
        self.endpoint.inquiry_url(inquiry)
    }

    /// "Ask Questions" link, offered for every item.
    pub fn question_url(&self, item: &CatalogItem) -> Url {
        self.endpoint.inquiry_url(Inquiry::Question(item))
    }
}

fn route_error(route: &Route, reason: &str) -> StorefrontError {
    ValidationError::InvalidFormat {
        field: "route".to_string(),
        reason: format!("'{}' {}", route, reason),
    }
    .into()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use duka_core::{Money, PhoneNumber};
    use duka_db::NewCatalogItem;

    fn endpoint() -> MessagingEndpoint {
        MessagingEndpoint::new("https://wa.me", PhoneNumber::parse("254741145421").unwrap()).unwrap()
    }

    fn item(category: Category, id: i64, name: &str, shillings: i64) -> CatalogItem {
        CatalogItem::new(ItemId::new(id), name, Money::from_shillings(shillings), category)
    }

    fn storefront(store: MemoryStore) -> Storefront {
        Storefront::new(Arc::new(store), endpoint())
    }

    fn text_param(url: &Url) -> String {
        url.query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_browse_add_and_checkout() {
        let store = MemoryStore::new().with(
            Category::Accessories,
            vec![
                item(Category::Accessories, 1, "USB-C Cable", 500),
                item(Category::Accessories, 2, "Screen Protector", 300),
            ],
        );
        let shop = storefront(store);
        shop.load_catalog().await;

        assert!(shop.checkout_url().is_none());

        for found in shop.search("c") {
            shop.add_to_cart(&found);
        }

        let url = shop.checkout_url().unwrap();
        assert_eq!(
            text_param(&url),
            "Hello! I want to buy:\n1. USB-C Cable - Ksh.500\n2. Screen Protector - Ksh.300\nTotal: Ksh.800"
        );
    }

    #[tokio::test]
    async fn test_route_and_view_product() {
        let store = MemoryStore::new()
            .with(Category::Accessories, vec![item(Category::Accessories, 2, "Phone Case", 400)])
            .with(Category::Refurbished, vec![item(Category::Refurbished, 2, "Galaxy S10", 24_000)]);
        let shop = storefront(store);
        shop.load_catalog().await;

        // Both items have id 2; the search result for the phone routes to accessories.
        let galaxy = shop.search("galaxy").remove(0);
        let route = shop.route_for(&galaxy);
        assert_eq!(route.path(), "/product/accessories/2");

        let Route::Product { kind, id } = route else {
            panic!("expected a product route");
        };
        let lookup = shop.view_product(kind, id).await;
        assert_eq!(lookup.item().map(|i| i.name.as_str()), Some("Phone Case"));
    }

    #[tokio::test]
    async fn test_product_errors_by_cause() {
        let store = MemoryStore::new()
            .with(Category::PhoneRepair, vec![item(Category::PhoneRepair, 3, "Battery Replacement", 2500)])
            .failing(Category::Refurbished);
        let shop = storefront(store);

        let found = shop.product(&Route::parse("/product/phone_repairs/3").unwrap()).await.unwrap();
        assert_eq!(found.name, "Battery Replacement");

        let missing = shop.product(&Route::parse("/product/phone_repairs/4").unwrap()).await;
        assert!(matches!(
            missing,
            Err(StorefrontError::Core(duka_core::CoreError::ItemNotFound(_)))
        ));

        let unavailable = shop.product(&Route::parse("/product/refurbished_products/1").unwrap()).await;
        assert!(matches!(
            unavailable,
            Err(StorefrontError::Store(StoreError::Unavailable(_)))
        ));

        for route in [Route::Cart, Route::parse("/product/products/1").unwrap()] {
            assert!(matches!(
                shop.product(&route).await,
                Err(StorefrontError::Validation(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_inquiry_links_follow_category() {
        let shop = storefront(MemoryStore::new());

        let repair = item(Category::LaptopRepair, 1, "Hinge Repair", 3500);
        let goods = item(Category::Accessories, 1, "Earphones", 800);

        assert_eq!(
            text_param(&shop.inquiry_url(&repair)),
            "Hello! I need help with Hinge Repair"
        );
        assert_eq!(
            text_param(&shop.inquiry_url(&goods)),
            "Hello! I have a question about Earphones"
        );
        assert_eq!(
            text_param(&shop.question_url(&repair)),
            "Hello! I have a question about Hinge Repair"
        );
    }

    #[tokio::test]
    async fn test_remove_from_cart_ignores_bad_index() {
        let shop = storefront(MemoryStore::new());
        shop.add_to_cart(&item(Category::Accessories, 1, "USB-C Cable", 500));

        shop.remove_from_cart(3);
        assert_eq!(shop.cart().totals().item_count, 1);

        shop.remove_from_cart(0);
        assert!(shop.checkout_url().is_none());
    }

    #[tokio::test]
    async fn test_open_over_sqlite() {
        let path = std::env::temp_dir().join(format!("duka-session-{}.db", Uuid::new_v4()));
        let mut config = StorefrontConfig::default();
        config.database.path = Some(path.clone());

        let seed = Database::open(DbConfig::new(&path)).await.unwrap();
        seed.catalog()
            .insert(
                Category::PhoneRepair,
                &NewCatalogItem::new("Battery Replacement", Money::from_shillings(2500)),
            )
            .await
            .unwrap();
        seed.close().await;

        let shop = Storefront::open(&config).await.unwrap();
        shop.load_catalog().await;

        assert_eq!(shop.listing(Category::PhoneRepair).len(), 1);
        assert!(shop.listing(Category::Refurbished).is_empty());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_unreadable_price_row_leaves_category_listed() {
        let path = std::env::temp_dir().join(format!("duka-session-{}.db", Uuid::new_v4()));
        let mut config = StorefrontConfig::default();
        config.database.path = Some(path.clone());

        let seed = Database::open(DbConfig::new(&path)).await.unwrap();
        for (name, price) in [
            ("USB-C Cable", "500"),
            ("Screen Protector", "300"),
            ("Phone Case", "400"),
            ("Charger", "1,500"),
        ] {
            sqlx::query("INSERT INTO accessories (name, price) VALUES (?1, ?2)")
                .bind(name)
                .bind(price)
                .execute(seed.pool())
                .await
                .unwrap();
        }
        seed.close().await;

        let shop = Storefront::open(&config).await.unwrap();
        shop.load_catalog().await;

        assert_eq!(shop.listing(Category::Accessories).len(), 3);
        let found: Vec<String> = shop.search("cable").into_iter().map(|i| i.name).collect();
        assert_eq!(found, vec!["USB-C Cable"]);

        let _ = std::fs::remove_file(&path);
    }
}
