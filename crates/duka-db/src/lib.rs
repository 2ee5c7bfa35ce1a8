//! # duka-db: Catalog Store
//!
//! This crate provides the read side of the storefront catalog, plus the
//! writes the seed tool needs. It uses SQLite with sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Duka Data Flow                                   │
//! │                                                                         │
//! │  CategoryLoader::load(Category::Accessories)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     duka-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────┐  ┌──────────────┐  │   │
//! │  │   │   Database    │    │   Repository    │  │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (catalog.rs)   │  │  (embedded)  │  │   │
//! │  │   │               │    │                 │  │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CatalogRepo     │  │ 001_catalog_ │  │   │
//! │  │   │ WAL, pooled   │    │ row → item      │  │ schema.sql   │  │   │
//! │  │   └───────────────┘    └─────────────────┘  └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SQLite: phone_repairs │ laptop_repairs │ accessories │          │   │
//! │  │          refurbished_products                                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Opening the catalog database
//! - `migrations` - Embedded database migrations, applied on open
//! - [`error`] - Database error types
//! - [`repository`] - Catalog repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use duka_core::Category;
//! use duka_db::{Database, DbConfig};
//!
//! let db = Database::open(DbConfig::new("duka.db")).await?;
//! let accessories = db.catalog().list(Category::Accessories).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, DbLocation};

pub use repository::catalog::{CatalogRepository, NewCatalogItem};
