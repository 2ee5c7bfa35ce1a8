//! # duka-core: Pure Storefront Logic
//!
//! This crate holds the storefront's domain rules as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Duka Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web Frontend                                 │   │
//! │  │    Home/Search ──► Category Listing ──► Product ──► Cart        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            Storefront session (apps/storefront)                 │   │
//! │  │    CategoryLoader, CatalogAggregator, CartState, Route          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ duka-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │ catalog  │ │ resolver │ │   cart   │ │    checkout      │  │   │
//! │  │   │ + search │ │ ItemKind │ │ CartItem │ │ message + URL    │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    duka-db (Catalog Store)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, CatalogItem, ItemAddress, ...)
//! - [`money`] - Shilling amounts in integer cents
//! - [`catalog`] - Per-category collections and cross-category search
//! - [`resolver`] - Category resolution by id membership
//! - [`cart`] - Positional cart of item snapshots
//! - [`checkout`] - Checkout message and messaging endpoint URLs
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use duka_core::{Cart, CatalogItem, Category, ItemId, Money};
//! use duka_core::checkout::build_message;
//!
//! let cable = CatalogItem::new(ItemId::new(1), "USB-C Cable", Money::from_shillings(500), Category::Accessories);
//! let mut cart = Cart::new();
//! cart.add(&cable);
//! cart.add(&cable);
//!
//! assert_eq!(cart.len(), 2);
//! assert_eq!(
//!     build_message(&cart),
//!     "1. USB-C Cable - Ksh.500\n2. USB-C Cable - Ksh.500\nTotal: Ksh.1,000"
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod resolver;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem, CartTotals};
pub use catalog::{search, Catalog};
pub use checkout::{build_endpoint_url, build_message, Inquiry, MessagingEndpoint};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use resolver::{resolve_type, ItemKind};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Literal prefix placed in front of every rendered shilling amount.
pub const CURRENCY_PREFIX: &str = "Ksh.";

/// Kind reported for an item that no held collection contains.
pub const GENERIC_PRODUCT_KIND: &str = "products";

/// Default messaging endpoint base.
pub const DEFAULT_MESSAGING_BASE_URL: &str = "https://wa.me";

/// Default first line of the checkout text.
pub const DEFAULT_CHECKOUT_GREETING: &str = "Hello! I want to buy:";
