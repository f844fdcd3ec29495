use crate::errors::StoreError;
use crate::executor::StatementExecutor;
use crate::query_builder::UpdateSet;
use crate::schema::SchemaInspector;
use crate::table::{SoftDeleteFieldResolver, TableCapabilities, TableDescriptor};
use crate::traits::{AssociationCascade, DeleteOptions, RulesChecker, SaveRecord, SoftDeleteModel};
use chrono::{SecondsFormat, Utc};
use config::SoftDeleteConfig;
use serde_json::{json, Value};
use signal_system::{DatabaseEvent, EventType, HookOutcome, SignalManager};
use std::sync::Arc;

/// Soft-delete store for one record type.
///
/// Holds the backend, the table's descriptor and capabilities, and the
/// optional collaborators (rules, cascade, custom save path, signals).
#[derive(Clone)]
pub struct SoftDeleteStore<T: SoftDeleteModel> {
    pub(crate) executor: Arc<dyn StatementExecutor>,
    pub(crate) resolver: SoftDeleteFieldResolver,
    pub(crate) descriptor: TableDescriptor,
    pub(crate) capabilities: TableCapabilities,
    pub(crate) settings: SoftDeleteConfig,
    pub(crate) signal_manager: Option<Arc<SignalManager>>,
    pub(crate) rules: Option<Arc<dyn RulesChecker<T>>>,
    pub(crate) cascade: Option<Arc<dyn AssociationCascade<T>>>,
    pub(crate) save_path: Option<Arc<dyn SaveRecord<T>>>,
}

impl<T: SoftDeleteModel> std::fmt::Debug for SoftDeleteStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftDeleteStore")
            .field("table", &self.descriptor.table_name())
            .field("capabilities", &self.capabilities)
            .field("redelete", &self.settings.redelete)
            .field("has_signals", &self.has_signals())
            .field("has_rules", &self.rules.is_some())
            .field("has_cascade", &self.cascade.is_some())
            .field("has_custom_save", &self.save_path.is_some())
            .finish()
    }
}

impl<T: SoftDeleteModel> SoftDeleteStore<T> {
    pub fn new(
        executor: Arc<dyn StatementExecutor>,
        schema: Arc<dyn SchemaInspector>,
        descriptor: TableDescriptor,
        capabilities: TableCapabilities,
        settings: SoftDeleteConfig,
    ) -> Self {
        Self {
            executor,
            resolver: SoftDeleteFieldResolver::new(schema, &settings.default_field),
            descriptor,
            capabilities,
            settings,
            signal_manager: None,
            rules: None,
            cascade: None,
            save_path: None,
        }
    }

    /// Build a store for `T`, detecting the table's capabilities once
    pub async fn open(
        executor: Arc<dyn StatementExecutor>,
        schema: Arc<dyn SchemaInspector>,
        settings: SoftDeleteConfig,
    ) -> Result<Self, StoreError> {
        let descriptor = TableDescriptor::of::<T>()?;
        let capabilities = TableCapabilities::detect(schema.as_ref(), &descriptor, &settings).await?;
        Ok(Self::new(executor, schema, descriptor, capabilities, settings))
    }

    /// Set signal manager for this store
    pub fn set_signal_manager(&mut self, signal_manager: Arc<SignalManager>) {
        self.signal_manager = Some(signal_manager);
    }

    /// Remove signal manager from this store
    pub fn remove_signal_manager(&mut self) {
        self.signal_manager = None;
    }

    /// Check if signal manager is set
    pub fn has_signals(&self) -> bool {
        self.signal_manager.is_some()
    }

    pub fn with_signal_manager(mut self, signal_manager: Arc<SignalManager>) -> Self {
        self.signal_manager = Some(signal_manager);
        self
    }

    pub fn with_rules_checker(mut self, rules: Arc<dyn RulesChecker<T>>) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_cascade(mut self, cascade: Arc<dyn AssociationCascade<T>>) -> Self {
        self.cascade = Some(cascade);
        self
    }

    /// Replace the built-in save path used by `restore`
    pub fn with_save_path(mut self, save_path: Arc<dyn SaveRecord<T>>) -> Self {
        self.save_path = Some(save_path);
        self
    }

    pub fn descriptor(&self) -> &TableDescriptor {
        &self.descriptor
    }

    pub fn capabilities(&self) -> &TableCapabilities {
        &self.capabilities
    }

    pub fn settings(&self) -> &SoftDeleteConfig {
        &self.settings
    }

    /// Current deletion-marker column, checked against the live schema
    pub async fn resolve_field(&self) -> Result<String, StoreError> {
        self.resolver.resolve(&self.descriptor).await
    }

    /// Columns written when a row is marked deleted
    pub(crate) fn deletion_set(&self, marker: &str, actor: Option<&str>) -> UpdateSet {
        let mut set = UpdateSet::new().set(marker, Value::String(now_timestamp()));

        if let Some(actor_field) = &self.capabilities.actor_field {
            set.insert(actor_field.clone(), json!(actor));
        }
        if let Some(flag) = &self.capabilities.status_flag {
            set.insert(flag.column.clone(), flag.deleted_value.clone());
        }

        set
    }

    /// Columns written when a row is restored
    pub(crate) fn restoration_set(&self, marker: &str) -> UpdateSet {
        let mut set = UpdateSet::new().set(marker, Value::Null);
        if let Some(flag) = &self.capabilities.status_flag {
            set.insert(flag.column.clone(), flag.active_value.clone());
        }
        set
    }

    pub(crate) fn delete_event(
        &self,
        event_type: EventType,
        record: &T,
        record_id: &str,
        actor: Option<&str>,
        options: &DeleteOptions,
    ) -> Result<DatabaseEvent, StoreError> {
        Ok(
            DatabaseEvent::new(event_type, self.descriptor.table_name().to_string())
                .with_record_id(record_id.to_string())
                .with_record(serde_json::to_value(record)?)
                .with_option("check_rules", json!(options.check_rules))
                .with_option("actor", json!(actor)),
        )
    }

    pub(crate) fn dispatch(&self, event: DatabaseEvent) -> HookOutcome {
        match &self.signal_manager {
            Some(signal_manager) => signal_manager.dispatch(event),
            None => HookOutcome::Proceed,
        }
    }
}

/// Marker timestamp, RFC 3339 in UTC
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
