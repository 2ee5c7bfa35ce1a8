//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogItem    │   │    Category     │   │  ItemAddress    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ItemId)    │   │  PhoneRepair    │   │  category       │       │
//! │  │  name           │   │  LaptopRepair   │   │  id             │       │
//! │  │  price (Money)  │   │  Accessories    │   │                 │       │
//! │  │  category ──────┼──►│  Refurbished    │   │ /product/t/id   │       │
//! │  │  images, ...    │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Per-Category Identity
//! An [`ItemId`] is only unique inside its own category. The pair
//! `(Category, ItemId)`, an [`ItemAddress`], is the stable global address.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{self, Money};
use crate::validation;

// =============================================================================
// Category
// =============================================================================

/// One of the four fixed catalog partitions.
///
/// Declaration order is the priority order used by search grouping and type
/// resolution: phone repairs, laptop repairs, accessories, refurbished goods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    #[serde(rename = "phone")]
    PhoneRepair,
    #[serde(rename = "laptop")]
    LaptopRepair,
    #[serde(rename = "accessories")]
    Accessories,
    #[serde(rename = "refurbished")]
    Refurbished,
}

impl Category {
    /// All categories in priority order.
    pub const ALL: [Category; 4] = [
        Category::PhoneRepair,
        Category::LaptopRepair,
        Category::Accessories,
        Category::Refurbished,
    ];

    /// Position in [`Category::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Category::PhoneRepair => 0,
            Category::LaptopRepair => 1,
            Category::Accessories => 2,
            Category::Refurbished => 3,
        }
    }

    /// Route segment of the category listing (`/phone`, `/accessories`, ...).
    pub const fn slug(self) -> &'static str {
        match self {
            Category::PhoneRepair => "phone",
            Category::LaptopRepair => "laptop",
            Category::Accessories => "accessories",
            Category::Refurbished => "refurbished",
        }
    }

    /// Backing store table holding this category's rows.
    pub const fn table(self) -> &'static str {
        match self {
            Category::PhoneRepair => "phone_repairs",
            Category::LaptopRepair => "laptop_repairs",
            Category::Accessories => "accessories",
            Category::Refurbished => "refurbished_products",
        }
    }

    /// Singular display name used on detail pages and breadcrumbs.
    pub const fn display_name(self) -> &'static str {
        match self {
            Category::PhoneRepair => "Phone Repair",
            Category::LaptopRepair => "Laptop Repair",
            Category::Accessories => "Accessory",
            Category::Refurbished => "Refurbished Product",
        }
    }

    /// Heading of the category listing page.
    pub const fn listing_title(self) -> &'static str {
        match self {
            Category::PhoneRepair => "Phone",
            Category::LaptopRepair => "Laptop",
            Category::Accessories => "Accessories",
            Category::Refurbished => "Refurbished",
        }
    }

    /// Repair services are quoted over chat instead of being added to a cart.
    pub const fn is_repair_service(self) -> bool {
        matches!(self, Category::PhoneRepair | Category::LaptopRepair)
    }

    /// Parses a listing route segment (`phone`, `laptop`, ...).
    pub fn from_slug(slug: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|c| c.slug() == slug)
            .ok_or_else(|| Self::not_allowed(Self::ALL.map(Category::slug)))
    }

    /// Parses a store table name (`phone_repairs`, ...).
    pub fn from_table(table: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|c| c.table() == table)
            .ok_or_else(|| Self::not_allowed(Self::ALL.map(Category::table)))
    }

    fn not_allowed(allowed: [&str; 4]) -> ValidationError {
        ValidationError::NotAllowed {
            field: "category".to_string(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Accepts either the route slug or the table name.
impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).or_else(|_| Self::from_table(s))
    }
}

// =============================================================================
// Item Identity
// =============================================================================

/// Per-category item identifier. NOT unique across categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        ItemId(id)
    }

    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(ItemId)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "id".to_string(),
                reason: format!("'{}' is not an integer", s),
            })
    }
}

/// Stable two-part address of an item: `(category, id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemAddress {
    pub category: Category,
    pub id: ItemId,
}

impl ItemAddress {
    pub const fn new(category: Category, id: ItemId) -> Self {
        ItemAddress { category, id }
    }

    /// Detail route: `/product/{table}/{id}`.
    pub fn path(&self) -> String {
        format!("/product/{}/{}", self.category.table(), self.id)
    }
}

impl fmt::Display for ItemAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.id)
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// One sellable product or repair service.
///
/// `category` is set by the loader that produced the item and is
/// authoritative; nothing infers it from which optional fields are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    pub id: ItemId,

    pub name: String,

    /// Shilling price. Accepts numbers or numeric strings on input.
    #[serde(with = "money::shillings")]
    #[ts(type = "number")]
    pub price: Money,

    pub category: Category,

    /// Zero, one or many image URLs, in display order.
    #[serde(default)]
    pub images: Vec<String>,

    /// Goods only.
    #[serde(default)]
    pub description: Option<String>,

    /// Repair services only: common issues handled.
    #[serde(default)]
    pub issues: Option<String>,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    /// Free-form product category from the store (e.g. "Chargers").
    #[serde(default)]
    pub product_category: Option<String>,
}

impl CatalogItem {
    /// Creates an item with only the required fields set.
    pub fn new(id: ItemId, name: impl Into<String>, price: Money, category: Category) -> Self {
        CatalogItem {
            id,
            name: name.into(),
            price,
            category,
            images: Vec::new(),
            description: None,
            issues: None,
            brand: None,
            model: None,
            product_category: None,
        }
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_issues(mut self, issues: impl Into<String>) -> Self {
        self.issues = Some(issues.into());
        self
    }

    /// Global `(category, id)` address of this item.
    #[inline]
    pub fn address(&self) -> ItemAddress {
        ItemAddress::new(self.category, self.id)
    }

    /// First image, used for thumbnails.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// What the visitor can do with this item from a listing or detail page.
    pub fn action(&self) -> ItemAction {
        if self.category.is_repair_service() {
            ItemAction::RequestRepair
        } else {
            ItemAction::AddToCart
        }
    }

    /// Labelled specification fields that are present, in display order.
    pub fn specifications(&self) -> Vec<(&'static str, &str)> {
        [
            ("Category", self.product_category.as_deref()),
            ("Brand", self.brand.as_deref()),
            ("Model", self.model.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect()
    }
}

/// Primary action offered for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ItemAction {
    /// Goods: append to the cart.
    AddToCart,
    /// Repair services: open a chat asking for help with the item.
    RequestRepair,
}

// =============================================================================
// Phone Number
// =============================================================================

/// Messaging phone number in international digits-only form (`254741145421`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validates and normalizes a phone number.
    ///
    /// ```rust
    /// use duka_core::PhoneNumber;
    ///
    /// let phone = PhoneNumber::parse("+254 741 145 421").unwrap();
    /// assert_eq!(phone.as_str(), "254741145421");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        validation::validate_phone_number(raw).map(PhoneNumber)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PhoneNumber::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
