//! # Storefront Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  StorefrontError                                                       │
//! │  ├── Config      ← storefront.toml / DUKA_* environment               │
//! │  ├── Database    ← opening the catalog store                           │
//! │  ├── Store       ← a fetch the caller chose not to swallow             │
//! │  ├── Validation  ← route segments, phone numbers, URLs                 │
//! │  └── Core        ← item lookups that came back missing                 │
//! │                                                                         │
//! │  Category list failures never reach this type: the loader turns them   │
//! │  into empty collections.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use duka_core::{CoreError, ValidationError};
use duka_db::DbError;
use thiserror::Error;

/// Result type alias for storefront operations.
pub type StorefrontResult<T> = Result<T, StorefrontError>;

/// Configuration failures, reported once at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("Failed to read config: {0}")]
    ReadFailed(String),

    /// Config file is not valid TOML for [`StorefrontConfig`](crate::config::StorefrontConfig).
    #[error("Failed to parse config: {0}")]
    ParseFailed(String),

    /// A value failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    /// A value is out of range.
    #[error("Invalid configuration: {0}")]
    OutOfRange(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::ReadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Failure reported by a [`CatalogStore`](crate::store::CatalogStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The SQLite store failed.
    #[error("Catalog store error: {0}")]
    Database(#[from] DbError),

    /// The store could not be reached at all.
    #[error("Catalog store unavailable: {0}")]
    Unavailable(String),
}

/// Top-level storefront error.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_error_maps_to_parse_failed() {
        let err = toml::from_str::<toml::Value>("phone_number = ").unwrap_err();
        assert!(matches!(ConfigError::from(err), ConfigError::ParseFailed(_)));
    }

    #[test]
    fn test_storefront_error_messages() {
        let err: StorefrontError = StoreError::Unavailable("connection refused".into()).into();
        assert_eq!(err.to_string(), "Catalog store unavailable: connection refused");

        let err: StorefrontError = ConfigError::OutOfRange("max_connections must be > 0".into()).into();
        assert_eq!(err.to_string(), "Invalid configuration: max_connections must be > 0");
    }
}
