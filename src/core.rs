//! Core SoftHaus functionality
//!
//! This module contains the main SoftHaus struct and its implementation,
//! providing centralized coordination of the backend, delete signals and
//! soft-delete stores.

use sqlx::PgPool;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::SoftHausError;
use config::{AppConfig, DatabaseConfig, SoftDeleteConfig};
use signal_system::SignalManager;
use store_object::{
    PgExecutor, PgSchemaInspector, SchemaInspector, SoftDeleteModel, SoftDeleteStore,
    StatementExecutor,
};

/// Main SoftHaus coordinator that owns the backend and the registered stores
pub struct SoftHaus {
    pool: Option<PgPool>,
    executor: Arc<dyn StatementExecutor>,
    schema: Arc<dyn SchemaInspector>,
    settings: SoftDeleteConfig,
    signal_manager: Arc<SignalManager>,
    stores: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl std::fmt::Debug for SoftHaus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftHaus")
            .field("has_pool", &self.pool.is_some())
            .field("settings", &self.settings)
            .field("stores", &self.stores.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SoftHaus {
    /// Create new SoftHaus with a PostgreSQL connection
    pub async fn new(
        config: DatabaseConfig,
        settings: SoftDeleteConfig,
    ) -> Result<Self, SoftHausError> {
        let connection_string = config.connection_string();

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;
        tracing::debug!(
            "[SOFTHAUS] Connected to {}:{}/{}",
            config.host,
            config.port,
            config.database
        );

        let mut softhaus = Self::with_backend(
            Arc::new(PgExecutor::new(pool.clone())),
            Arc::new(PgSchemaInspector::new(pool.clone())),
            settings,
        );
        softhaus.pool = Some(pool);
        Ok(softhaus)
    }

    /// Connect using a loaded application configuration
    pub async fn from_config(config: AppConfig) -> Result<Self, SoftHausError> {
        Self::new(config.database, config.soft_delete).await
    }

    /// Connect using configuration from `SOFTHAUS_CONFIG` or `./softhaus.toml`
    pub async fn from_env() -> Result<Self, SoftHausError> {
        Self::from_config(AppConfig::load()?).await
    }

    /// Run on any executor and schema inspector, e.g. the in-memory backend
    pub fn with_backend(
        executor: Arc<dyn StatementExecutor>,
        schema: Arc<dyn SchemaInspector>,
        settings: SoftDeleteConfig,
    ) -> Self {
        Self {
            pool: None,
            executor,
            schema,
            settings,
            signal_manager: Arc::new(SignalManager::new()),
            stores: HashMap::new(),
        }
    }

    /// Get database pool reference
    pub fn pool(&self) -> Result<&PgPool, SoftHausError> {
        self.pool.as_ref().ok_or(SoftHausError::NoDatabasePool)
    }

    pub fn settings(&self) -> &SoftDeleteConfig {
        &self.settings
    }

    /// Signal manager shared by every store built here
    pub fn signal_manager(&self) -> &Arc<SignalManager> {
        &self.signal_manager
    }

    /// Build a store for `T`; the table's capabilities are detected now
    pub async fn store<T: SoftDeleteModel>(&self) -> Result<SoftDeleteStore<T>, SoftHausError> {
        let store = SoftDeleteStore::<T>::open(
            self.executor.clone(),
            self.schema.clone(),
            self.settings.clone(),
        )
        .await?;
        Ok(store.with_signal_manager(self.signal_manager.clone()))
    }

    /// Register a store object with a given name
    pub fn register_store<T>(
        &mut self,
        name: String,
        store: SoftDeleteStore<T>,
    ) -> Result<(), SoftHausError>
    where
        T: SoftDeleteModel,
    {
        if self.stores.contains_key(&name) {
            return Err(SoftHausError::StoreAlreadyRegistered(name));
        }

        self.stores.insert(name, Box::new(store));
        Ok(())
    }

    /// Get a registered store object by name
    pub fn get_store<T>(&self, name: &str) -> Result<&SoftDeleteStore<T>, SoftHausError>
    where
        T: SoftDeleteModel,
    {
        self.stores
            .get(name)
            .and_then(|store| store.downcast_ref::<SoftDeleteStore<T>>())
            .ok_or_else(|| SoftHausError::StoreNotFound(name.to_string()))
    }

    /// Get a mutable reference to a registered store object by name
    pub fn get_store_mut<T>(&mut self, name: &str) -> Result<&mut SoftDeleteStore<T>, SoftHausError>
    where
        T: SoftDeleteModel,
    {
        self.stores
            .get_mut(name)
            .and_then(|store| store.downcast_mut::<SoftDeleteStore<T>>())
            .ok_or_else(|| SoftHausError::StoreNotFound(name.to_string()))
    }

    /// List all registered store names
    pub fn list_stores(&self) -> Vec<&String> {
        self.stores.keys().collect()
    }

    /// Remove a store object by name
    pub fn unregister_store(&mut self, name: &str) -> Result<(), SoftHausError> {
        self.stores
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| SoftHausError::StoreNotFound(name.to_string()))
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), SoftHausError> {
        sqlx::query("SELECT 1").fetch_one(self.pool()?).await?;
        Ok(())
    }
}
