//! # Navigation
//!
//! Storefront routes, validated at the boundary so raw path segments never
//! reach a store query.
//!
//! ```text
//! /                          Route::Home
//! /cart                      Route::Cart
//! /{slug}                    Route::Category      phone | laptop | accessories | refurbished
//! /product/{type}/{id}       Route::Product       type = table name or "products"
//! ```

use std::fmt;
use std::str::FromStr;

use duka_core::{CatalogItem, Category, ItemId, ItemKind, ValidationError, GENERIC_PRODUCT_KIND};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Cart,
    Category(Category),
    Product { kind: ItemKind, id: ItemId },
}

impl Route {
    /// Detail route for an item whose kind was resolved against the catalog.
    pub fn product(kind: ItemKind, item: &CatalogItem) -> Self {
        Route::Product { kind, id: item.id }
    }

    /// Parses a path such as `/product/phone_repairs/3`.
    ///
    /// A trailing slash is ignored.
    pub fn parse(path: &str) -> Result<Self, ValidationError> {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .trim_start_matches('/')
            .trim_end_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Ok(Route::Home),
            ["cart"] => Ok(Route::Cart),
            ["product", kind, id] => Ok(Route::Product {
                kind: parse_kind(kind)?,
                id: id.parse()?,
            }),
            [slug] => Ok(Route::Category(Category::from_slug(slug)?)),
            _ => Err(ValidationError::InvalidFormat {
                field: "route".to_string(),
                reason: format!("unknown path '{}'", trimmed),
            }),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Cart => "/cart".to_string(),
            Route::Category(category) => format!("/{}", category.slug()),
            Route::Product { kind, id } => format!("/product/{}/{}", kind, id),
        }
    }

    /// Where "back" leads from this route.
    pub fn parent(&self) -> Route {
        match self {
            Route::Product {
                kind: ItemKind::Category(category),
                ..
            } => Route::Category(*category),
            _ => Route::Home,
        }
    }
}

fn parse_kind(segment: &str) -> Result<ItemKind, ValidationError> {
    if segment == GENERIC_PRODUCT_KIND {
        Ok(ItemKind::GenericProduct)
    } else {
        Category::from_table(segment).map(ItemKind::Category)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}
