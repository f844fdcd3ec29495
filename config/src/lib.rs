//! # Configuration Management for SoftHaus
//!
//! This crate provides centralized configuration structures for the SoftHaus
//! components: the database connection and the soft-delete conventions.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{DatabaseConfig, SoftDeleteConfig, RedeletePolicy};
//!
//! let db_config = DatabaseConfig::new(
//!     "localhost".to_string(), 5432, "myapp".to_string(),
//!     "postgres".to_string(), "password".to_string(),
//!     1, 10, 30, 600, 3600,
//! );
//!
//! let soft_delete = SoftDeleteConfig::default().with_redelete(RedeletePolicy::Refresh);
//! assert_eq!(soft_delete.default_field, "deleted");
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [database]
//! host = "localhost"
//! port = 5432
//! database = "myapp"
//! username = "postgres"
//! password = "password"
//! min_connections = 1
//! max_connections = 10
//! connection_timeout_seconds = 30
//! idle_timeout_seconds = 600
//! max_lifetime_seconds = 3600
//!
//! [soft_delete]
//! default_field = "deleted"
//! actor_field = "deleted_by"
//! status_flag_field = "DEL_FLAG"
//! status_flag_deleted_value = "D"
//! redelete = "skip"
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from softhaus.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./softhaus.toml";
const CONFIG_PATH_ENV: &str = "SOFTHAUS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub soft_delete: SoftDeleteConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
    pub max_lifetime_seconds: u64,
}

/// What a soft delete does to a row that is already soft-deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedeletePolicy {
    /// Only active rows are updated; deleting twice reports `false` the second time
    #[default]
    Skip,
    /// The marker and actor of an already deleted row are overwritten
    Refresh,
}

/// Column conventions for soft-deletable tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoftDeleteConfig {
    /// Marker column used when a model does not name its own
    pub default_field: String,
    /// Column recording who deleted the row (written only if the table has it)
    pub actor_field: String,
    /// Optional secondary status column; `None` disables detection entirely
    pub status_flag_field: Option<String>,
    /// Value written to the status column on delete
    pub status_flag_deleted_value: String,
    /// Value written to the status column on restore; `None` writes NULL
    pub status_flag_active_value: Option<String>,
    pub redelete: RedeletePolicy,
}

impl Default for SoftDeleteConfig {
    fn default() -> Self {
        Self {
            default_field: "deleted".to_string(),
            actor_field: "deleted_by".to_string(),
            status_flag_field: Some("DEL_FLAG".to_string()),
            status_flag_deleted_value: "D".to_string(),
            status_flag_active_value: None,
            redelete: RedeletePolicy::Skip,
        }
    }
}

impl SoftDeleteConfig {
    pub fn with_redelete(mut self, redelete: RedeletePolicy) -> Self {
        self.redelete = redelete;
        self
    }

    pub fn with_default_field(mut self, field: impl Into<String>) -> Self {
        self.default_field = field.into();
        self
    }

    pub fn with_actor_field(mut self, field: impl Into<String>) -> Self {
        self.actor_field = field.into();
        self
    }

    pub fn without_status_flag(mut self) -> Self {
        self.status_flag_field = None;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_field.is_empty() {
            return Err(ConfigError::Invalid(
                "Soft delete default_field cannot be empty".to_string(),
            ));
        }
        if self.actor_field.is_empty() {
            return Err(ConfigError::Invalid(
                "Soft delete actor_field cannot be empty".to_string(),
            ));
        }
        if matches!(&self.status_flag_field, Some(field) if field.is_empty()) {
            return Err(ConfigError::Invalid(
                "Soft delete status_flag_field cannot be empty when set".to_string(),
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from the TOML file named in .env or the default path
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(e.into());
            }
        }

        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            Self::from_file(&config_path)
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Err(ConfigError::Invalid(format!(
                "Config path must be specified in .env file as {} or in {} file",
                CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH
            )))
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.host.is_empty() {
            return Err(ConfigError::Invalid(
                "Database host cannot be empty".to_string(),
            ));
        }
        if self.database.port == 0 {
            return Err(ConfigError::Invalid(
                "Database port cannot be zero".to_string(),
            ));
        }
        if self.database.database.is_empty() {
            return Err(ConfigError::Invalid(
                "Database name cannot be empty".to_string(),
            ));
        }
        if self.database.username.is_empty() {
            return Err(ConfigError::Invalid(
                "Database username cannot be empty".to_string(),
            ));
        }
        if self.database.min_connections == 0 {
            return Err(ConfigError::Invalid(
                "Database min_connections must be greater than 0".to_string(),
            ));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid(
                "Database min_connections cannot be greater than max_connections".to_string(),
            ));
        }
        if self.database.connection_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "Database connection_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        self.soft_delete.validate()
    }
}

impl DatabaseConfig {
    /// Create a new database configuration
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        host: String,
        port: u16,
        database: String,
        username: String,
        password: String,
        min_connections: u32,
        max_connections: u32,
        connection_timeout_seconds: u64,
        idle_timeout_seconds: u64,
        max_lifetime_seconds: u64,
    ) -> Self {
        Self {
            host,
            port,
            database,
            username,
            password,
            min_connections,
            max_connections,
            connection_timeout_seconds,
            idle_timeout_seconds,
            max_lifetime_seconds,
        }
    }

    /// Build connection string
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }
}
