//! # Repository Module
//!
//! Database repository implementations for the catalog store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Repository                                   │
//! │                                                                         │
//! │  CategoryLoader                                                        │
//! │       │                                                                 │
//! │       │  db.catalog().list(Category::PhoneRepair)                      │
//! │       ▼                                                                 │
//! │  CatalogRepository                                                     │
//! │  ├── list(&self, category)          all rows, ascending id            │
//! │  ├── get(&self, category, id)       at most one row                   │
//! │  ├── insert(&self, category, item)  seed tool only                    │
//! │  └── count(&self, category)                                            │
//! │       │                                                                 │
//! │       │  Category::table() picks the table; no raw strings             │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CatalogRepository`](catalog::CatalogRepository) - Per-category item rows

pub mod catalog;
