//! # SoftHaus
//!
//! Soft deletion for PostgreSQL record stores: deletes become a timestamped
//! marker, dependents are cascaded first, soft-deleted rows can be purged or
//! restored, and reads skip them unless asked otherwise.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use softhaus::prelude::*;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Article {
//!     pub id: Option<i64>,
//!     pub title: String,
//!     pub deleted: Option<String>,
//!     pub deleted_by: Option<String>,
//! }
//!
//! impl SoftDeleteModel for Article {
//!     fn table_name() -> &'static str {
//!         "articles"
//!     }
//!
//!     fn primary_key_fields() -> &'static [&'static str] {
//!         &["id"]
//!     }
//!
//!     fn is_new(&self) -> bool {
//!         self.id.is_none()
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 5432, "softhaus".to_string(),
//!         "postgres".to_string(), "password".to_string(),
//!         1, 5, 30, 600, 3600,
//!     );
//!
//!     let softhaus = SoftHaus::new(config, SoftDeleteConfig::default()).await?;
//!     softhaus.ensure_soft_delete_columns::<Article>().await?;
//!
//!     let articles = softhaus.store::<Article>().await?;
//!     let article = articles
//!         .find_one(QueryBuilder::new().filter(QueryFilter::eq("id", serde_json::json!(7))))
//!         .await?;
//!
//!     if let Some(article) = article {
//!         articles
//!             .soft_delete(&article, Some("alice"), DeleteOptions::default())
//!             .await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod migration;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::SoftHaus;
pub use errors::SoftHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, RedeletePolicy, SoftDeleteConfig};

// Re-export internal crates used by the public API
pub use signal_system;
pub use store_object;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
