//! # Catalog Repository
//!
//! Database operations for the four category tables.
//!
//! ## Row Conversion
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  accessories row                          CatalogItem                   │
//! │  ───────────────────────────             ──────────────────────────     │
//! │  id          7                      ──►   id        ItemId(7)           │
//! │  price       "1500.00"   (TEXT)     ──►   price     Money(150_000)      │
//! │  image_url   '["a.jpg","b.jpg"]'    ──►   images    [a.jpg, b.jpg]      │
//! │  image_urls  NULL                                                      │
//! │  category    "Chargers"             ──►   product_category              │
//! │  (table)     accessories            ──►   category  Accessories         │
//! │                                                                         │
//! │  image_urls wins when it holds a non-empty array; otherwise image_url  │
//! │  is read as either one URL or a JSON array.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `list` skips a row that fails conversion and logs it; `get` reports it
//! as [`DbError::InvalidRow`].

use duka_core::validation::validate_item_name;
use duka_core::{CatalogItem, Category, ItemId, Money, ValidationError};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

const COLUMNS: &str =
    "id, name, price, image_url, image_urls, description, issues, brand, model, category";

/// Raw row shape shared by all four tables.
#[derive(Debug, Clone, FromRow)]
struct CatalogRow {
    id: i64,
    name: String,
    price: String,
    image_url: Option<String>,
    image_urls: Option<String>,
    description: Option<String>,
    issues: Option<String>,
    brand: Option<String>,
    model: Option<String>,
    category: Option<String>,
}

impl CatalogRow {
    /// Converts the row, tagging it with the category it was read from.
    fn into_item(self, category: Category) -> DbResult<CatalogItem> {
        let table = category.table();

        let price = Money::parse(&self.price)
            .map_err(|e| DbError::invalid_row(table, self.id, e.to_string()))?;

        let images = decode_images(self.image_url.as_deref(), self.image_urls.as_deref())
            .map_err(|reason| DbError::invalid_row(table, self.id, reason))?;

        Ok(CatalogItem {
            id: ItemId::new(self.id),
            name: self.name,
            price,
            category,
            images,
            description: non_blank(self.description),
            issues: non_blank(self.issues),
            brand: non_blank(self.brand),
            model: non_blank(self.model),
            product_category: non_blank(self.category),
        })
    }
}

/// An item to be written by the seed tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCatalogItem {
    pub name: String,
    pub price: Money,
    pub images: Vec<String>,
    pub description: Option<String>,
    pub issues: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub product_category: Option<String>,
}

impl NewCatalogItem {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        NewCatalogItem {
            name: name.into(),
            price,
            ..Default::default()
        }
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn issues(mut self, issues: impl Into<String>) -> Self {
        self.issues = Some(issues.into());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn product_category(mut self, product_category: impl Into<String>) -> Self {
        self.product_category = Some(product_category.into());
        self
    }
}

/// Repository for catalog database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CatalogRepository::new(pool);
///
/// let repairs = repo.list(Category::PhoneRepair).await?;
/// let cable = repo.get(Category::Accessories, ItemId::new(3)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Lists every item in a category, ascending by id.
    ///
    /// Rows with an unreadable price or image list are left out and logged;
    /// the rest of the category is still returned, each tagged with `category`.
    pub async fn list(&self, category: Category) -> DbResult<Vec<CatalogItem>> {
        let table = category.table();
        debug!(table, "Listing catalog items");

        let sql = format!("SELECT {} FROM {} ORDER BY id ASC", COLUMNS, table);
        let rows: Vec<CatalogRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        let items: Vec<CatalogItem> = rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id;
                match row.into_item(category) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        warn!(table, id, error = %e, "Skipping unreadable catalog row");
                        None
                    }
                }
            })
            .collect();

        debug!(table, count = items.len(), "Catalog items loaded");
        Ok(items)
    }

    /// Gets a single item by category and id.
    ///
    /// ## Returns
    /// * `Ok(Some(item))` - Item found
    /// * `Ok(None)` - No row with this id in the category's table
    pub async fn get(&self, category: Category, id: ItemId) -> DbResult<Option<CatalogItem>> {
        let table = category.table();
        debug!(table, id = id.get(), "Fetching catalog item");

        let sql = format!("SELECT {} FROM {} WHERE id = ?1", COLUMNS, table);
        let row: Option<CatalogRow> = sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| row.into_item(category)).transpose()
    }

    /// Inserts a new item and returns it with its assigned id.
    ///
    /// Images are written to `image_urls` as a JSON array, with the first one
    /// mirrored into `image_url`.
    pub async fn insert(&self, category: Category, item: &NewCatalogItem) -> DbResult<CatalogItem> {
        validate_item_name(&item.name)?;
        if item.price.is_negative() {
            return Err(ValidationError::Negative {
                field: "price".to_string(),
            }
            .into());
        }

        let table = category.table();
        let name = item.name.trim();
        debug!(table, name, "Inserting catalog item");

        let image_urls = if item.images.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&item.images).map_err(|e| DbError::Internal(e.to_string()))?)
        };

        let sql = format!(
            "INSERT INTO {} (name, price, image_url, image_urls, description, issues, brand, model, category) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            table
        );

        let result = sqlx::query(&sql)
            .bind(name)
            .bind(encode_price(item.price))
            .bind(item.images.first().map(String::as_str))
            .bind(image_urls)
            .bind(item.description.as_deref())
            .bind(item.issues.as_deref())
            .bind(item.brand.as_deref())
            .bind(item.model.as_deref())
            .bind(item.product_category.as_deref())
            .execute(&self.pool)
            .await?;

        Ok(CatalogItem {
            id: ItemId::new(result.last_insert_rowid()),
            name: name.to_string(),
            price: item.price,
            category,
            images: item.images.clone(),
            description: item.description.clone(),
            issues: item.issues.clone(),
            brand: item.brand.clone(),
            model: item.model.clone(),
            product_category: item.product_category.clone(),
        })
    }

    /// Counts the rows in a category (for diagnostics and the seed tool).
    pub async fn count(&self, category: Category) -> DbResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", category.table());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;

        Ok(count)
    }
}

// =============================================================================
// Column Codecs
// =============================================================================

/// Plain decimal text for the `price` column: `1500`, `499.50`.
fn encode_price(price: Money) -> String {
    match price.cents_part() {
        0 => price.shillings().to_string(),
        cents => format!("{}.{:02}", price.shillings(), cents),
    }
}

fn decode_images(image_url: Option<&str>, image_urls: Option<&str>) -> Result<Vec<String>, String> {
    if let Some(list) = image_urls.map(str::trim).filter(|s| !s.is_empty()) {
        let urls = parse_url_array(list)?;
        if !urls.is_empty() {
            return Ok(urls);
        }
    }

    match image_url.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(Vec::new()),
        Some(raw) if raw.starts_with('[') => parse_url_array(raw),
        Some(url) => Ok(vec![url.to_string()]),
    }
}

fn parse_url_array(raw: &str) -> Result<Vec<String>, String> {
    serde_json::from_str::<Vec<String>>(raw)
        .map(|urls| {
            urls.into_iter()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty())
                .collect()
        })
        .map_err(|e| format!("image list is not a JSON array of strings: {}", e))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================
