//! Table descriptors, per-table capabilities and deletion-field resolution

use crate::errors::StoreError;
use crate::query_builder::QueryFilter;
use crate::schema::SchemaInspector;
use crate::traits::SoftDeleteModel;
use crate::validation::{ValidatedFieldName, ValidatedTableName};
use config::SoftDeleteConfig;
use serde_json::Value;
use std::sync::Arc;

/// Backing table of a record type
#[derive(Debug, Clone, PartialEq)]
pub struct TableDescriptor {
    table: ValidatedTableName,
    primary_key: Vec<ValidatedFieldName>,
    soft_delete_field: Option<ValidatedFieldName>,
}

impl TableDescriptor {
    pub fn new(
        table: &str,
        primary_key: &[&str],
        soft_delete_field: Option<&str>,
    ) -> Result<Self, StoreError> {
        if primary_key.is_empty() {
            return Err(StoreError::InvalidConfiguration {
                message: format!("table {} declares no primary key", table),
            });
        }

        Ok(Self {
            table: ValidatedTableName::new(table)?,
            primary_key: primary_key
                .iter()
                .map(|column| ValidatedFieldName::new(column))
                .collect::<Result<_, _>>()?,
            soft_delete_field: soft_delete_field.map(ValidatedFieldName::new).transpose()?,
        })
    }

    /// Descriptor from a model's static metadata
    pub fn of<T: SoftDeleteModel>() -> Result<Self, StoreError> {
        Self::new(T::table_name(), T::primary_key_fields(), T::soft_delete_field())
    }

    pub fn table(&self) -> &ValidatedTableName {
        &self.table
    }

    pub fn table_name(&self) -> &str {
        self.table.as_str()
    }

    pub fn primary_key(&self) -> &[ValidatedFieldName] {
        &self.primary_key
    }

    pub fn configured_field(&self) -> Option<&str> {
        self.soft_delete_field.as_ref().map(|field| field.as_str())
    }

    /// Key columns paired with the record's values.
    ///
    /// Fails with `InvalidArgument` if any key column is absent or NULL.
    pub fn primary_key_values<T: SoftDeleteModel>(
        &self,
        record: &T,
        operation: &str,
    ) -> Result<Vec<(String, Value)>, StoreError> {
        self.primary_key
            .iter()
            .map(|column| match record.field_value(column.as_str()) {
                Some(value) if !value.is_null() => Ok((column.to_string(), value)),
                _ => Err(StoreError::incomplete_primary_key(operation)),
            })
            .collect()
    }

    /// Primary-key equality conditions for `record`
    pub fn primary_key_conditions<T: SoftDeleteModel>(
        &self,
        record: &T,
        operation: &str,
    ) -> Result<Vec<QueryFilter>, StoreError> {
        Ok(QueryFilter::all_eq(self.primary_key_values(record, operation)?))
    }
}

/// Render a key tuple for logs and events, e.g. `7` or `3,en`
pub fn record_id(key: &[(String, Value)]) -> String {
    key.iter()
        .map(|(_, value)| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Secondary "deleted" indicator column some installations carry
#[derive(Debug, Clone, PartialEq)]
pub struct StatusFlag {
    pub column: String,
    pub deleted_value: Value,
    pub active_value: Value,
}

/// Optional columns of a table, detected once when a store is built
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCapabilities {
    pub actor_field: Option<String>,
    pub status_flag: Option<StatusFlag>,
}

impl TableCapabilities {
    /// A table with neither actor nor status columns
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_actor_field(mut self, column: &str) -> Self {
        self.actor_field = Some(column.to_string());
        self
    }

    pub fn with_status_flag(mut self, flag: StatusFlag) -> Self {
        self.status_flag = Some(flag);
        self
    }

    /// Inspect the schema for the configured actor and status-flag columns
    pub async fn detect(
        schema: &dyn SchemaInspector,
        descriptor: &TableDescriptor,
        settings: &SoftDeleteConfig,
    ) -> Result<Self, StoreError> {
        let table_schema = schema.describe(descriptor.table_name()).await?;

        let actor_field = table_schema
            .has_column(&settings.actor_field)
            .then(|| ValidatedFieldName::new(&settings.actor_field))
            .transpose()?
            .map(ValidatedFieldName::into_string);

        let status_flag = match &settings.status_flag_field {
            Some(column) if table_schema.has_column(column) => Some(StatusFlag {
                column: ValidatedFieldName::new(column)?.into_string(),
                deleted_value: Value::String(settings.status_flag_deleted_value.clone()),
                active_value: settings
                    .status_flag_active_value
                    .clone()
                    .map(Value::String)
                    .unwrap_or(Value::Null),
            }),
            _ => None,
        };

        tracing::debug!(
            "[CAPABILITIES] Table: {}, actor: {:?}, status flag: {:?}",
            descriptor.table_name(),
            actor_field,
            status_flag.as_ref().map(|flag| &flag.column)
        );

        Ok(Self {
            actor_field,
            status_flag,
        })
    }
}

/// Determines which column holds the deletion marker.
///
/// Resolution happens on every call; the schema may change between
/// operations and nothing is cached.
#[derive(Clone)]
pub struct SoftDeleteFieldResolver {
    schema: Arc<dyn SchemaInspector>,
    default_field: String,
}

impl std::fmt::Debug for SoftDeleteFieldResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftDeleteFieldResolver")
            .field("default_field", &self.default_field)
            .finish()
    }
}

impl SoftDeleteFieldResolver {
    pub fn new(schema: Arc<dyn SchemaInspector>, default_field: &str) -> Self {
        Self {
            schema,
            default_field: default_field.to_string(),
        }
    }

    pub fn default_field(&self) -> &str {
        &self.default_field
    }

    pub async fn resolve(&self, descriptor: &TableDescriptor) -> Result<String, StoreError> {
        let field = descriptor
            .configured_field()
            .unwrap_or(self.default_field.as_str());
        let field = ValidatedFieldName::new(field)?;

        if self
            .schema
            .column(descriptor.table_name(), field.as_str())
            .await?
            .is_none()
        {
            return Err(StoreError::missing_column(
                descriptor.table_name(),
                field.as_str(),
            ));
        }

        Ok(field.into_string())
    }
}
