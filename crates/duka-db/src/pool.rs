//! # Catalog Database
//!
//! Opens the SQLite file behind the catalog store and hands out repositories.
//!
//! ## Connection Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new("duka.db").max_connections(4)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::open ── WAL, NORMAL sync ── migrations/sqlite applied       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqlitePool  (one connection per concurrent category load)             │
//! │   phone_repairs ─► conn   laptop_repairs ─► conn                        │
//! │   accessories ───► conn   refurbished_products ─► conn                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! In-memory databases live only as long as their single connection, so the
//! pool never retires it.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::catalog::CatalogRepository;

/// One connection per category, so a full refresh never queues.
const DEFAULT_MAX_CONNECTIONS: u32 = 4;

/// Where the catalog lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

/// Catalog database settings.
///
/// ```rust,ignore
/// let db = Database::open(DbConfig::new("/var/lib/duka/duka.db").max_connections(8)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub location: DbLocation,
    pub max_connections: u32,
}

impl DbConfig {
    /// A file database, created on first open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: DbLocation::File(path.into()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// A private, empty database for tests.
    pub fn in_memory() -> Self {
        DbConfig {
            location: DbLocation::Memory,
            max_connections: 1,
        }
    }

    /// Ignored for in-memory databases, which need exactly one connection.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = match &self.location {
            DbLocation::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal),
            DbLocation::Memory => SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
                .journal_mode(SqliteJournalMode::Memory),
        };

        Ok(options.synchronous(SqliteSynchronous::Normal))
    }
}

/// Handle to the catalog database.
///
/// Clones share the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connects and brings the schema up to date.
    pub async fn open(config: DbConfig) -> DbResult<Self> {
        info!(location = ?config.location, "Opening catalog database");

        let pool_options = match config.location {
            DbLocation::File(_) => SqlitePoolOptions::new().max_connections(config.max_connections),
            DbLocation::Memory => SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None),
        };

        let pool = pool_options
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        migrations::run_migrations(&pool).await?;
        debug!("Catalog schema ready");

        Ok(Database { pool })
    }

    /// Raw pool, for tools that write rows the repository does not model.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// ```rust,ignore
    /// let cables = db.catalog().list(Category::Accessories).await?;
    /// ```
    pub fn catalog(&self) -> CatalogRepository {
        CatalogRepository::new(self.pool.clone())
    }

    /// After this, every repository call fails.
    pub async fn close(&self) {
        info!("Closing catalog database");
        self.pool.close().await;
    }

    /// True when the database answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
