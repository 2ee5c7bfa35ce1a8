//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Load order (later overrides earlier)                                   │
//! │                                                                         │
//! │  1. Defaults            wa.me, 254741145421, "Hello! I want to buy:"   │
//! │  2. storefront.toml     explicit path, else the platform config dir    │
//! │  3. Environment         DUKA_DB_PATH, DUKA_PHONE_NUMBER,               │
//! │                         DUKA_MESSAGING_BASE_URL, DUKA_CHECKOUT_GREETING│
//! │  4. validate()          once; the config is immutable afterwards       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [database]
//! path = "/var/lib/duka/duka.db"
//! max_connections = 4
//!
//! [messaging]
//! base_url = "https://wa.me"
//! phone_number = "254741145421"
//! greeting = "Hello! I want to buy:"
//! ```

use directories::ProjectDirs;
use duka_core::validation::validate_messaging_base_url;
use duka_core::{MessagingEndpoint, PhoneNumber, DEFAULT_CHECKOUT_GREETING, DEFAULT_MESSAGING_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::ConfigError;

const CONFIG_FILE_NAME: &str = "storefront.toml";
const DB_FILE_NAME: &str = "duka.db";
const DEFAULT_PHONE_NUMBER: &str = "254741145421";

pub const ENV_DB_PATH: &str = "DUKA_DB_PATH";
pub const ENV_PHONE_NUMBER: &str = "DUKA_PHONE_NUMBER";
pub const ENV_MESSAGING_BASE_URL: &str = "DUKA_MESSAGING_BASE_URL";
pub const ENV_CHECKOUT_GREETING: &str = "DUKA_CHECKOUT_GREETING";

// =============================================================================
// Sections
// =============================================================================

/// Catalog store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file. Defaults to `duka.db` in the platform data dir.
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    4
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            max_connections: default_max_connections(),
        }
    }
}

/// External messaging endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_phone_number")]
    pub phone_number: String,

    /// First line of the checkout text. Empty disables it.
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

fn default_base_url() -> String {
    DEFAULT_MESSAGING_BASE_URL.to_string()
}

fn default_phone_number() -> String {
    DEFAULT_PHONE_NUMBER.to_string()
}

fn default_greeting() -> String {
    DEFAULT_CHECKOUT_GREETING.to_string()
}

impl Default for MessagingSettings {
    fn default() -> Self {
        MessagingSettings {
            base_url: default_base_url(),
            phone_number: default_phone_number(),
            greeting: default_greeting(),
        }
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub messaging: MessagingSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document and validates it. No environment overrides.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        PhoneNumber::parse(&self.messaging.phone_number)?;
        validate_messaging_base_url(&self.messaging.base_url)?;

        if self.database.max_connections == 0 {
            return Err(ConfigError::OutOfRange(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `DUKA_*` overrides read through `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH) {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(phone) = lookup(ENV_PHONE_NUMBER) {
            debug!("Overriding phone number from environment");
            self.messaging.phone_number = phone;
        }

        if let Some(url) = lookup(ENV_MESSAGING_BASE_URL) {
            debug!(url = %url, "Overriding messaging base URL from environment");
            self.messaging.base_url = url;
        }

        if let Some(greeting) = lookup(ENV_CHECKOUT_GREETING) {
            self.messaging.greeting = greeting;
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "duka", "storefront")
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Catalog database path: configured, else the platform data dir, else
    /// the working directory.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.database.path {
            return path.clone();
        }

        match Self::project_dirs() {
            Some(dirs) => dirs.data_dir().join(DB_FILE_NAME),
            None => {
                warn!("Could not determine data directory, using working directory");
                PathBuf::from(DB_FILE_NAME)
            }
        }
    }

    pub fn phone_number(&self) -> Result<PhoneNumber, ConfigError> {
        Ok(PhoneNumber::parse(&self.messaging.phone_number)?)
    }

    /// Builds the messaging endpoint described by the `[messaging]` section.
    pub fn messaging_endpoint(&self) -> Result<MessagingEndpoint, ConfigError> {
        let endpoint = MessagingEndpoint::new(&self.messaging.base_url, self.phone_number()?)?
            .with_greeting(self.messaging.greeting.clone());
        Ok(endpoint)
    }
}
