//! Trait definitions
//!
//! This module defines the record side of soft deletion.

use crate::errors::StoreError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;

/// A record type stored in a soft-deletable table.
///
/// Only the table metadata and `is_new` must be written by hand; field
/// access defaults to the record's serde representation, so the JSON keys
/// must match the column names.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use store_object::SoftDeleteModel;
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Article {
///     pub id: Option<i64>,
///     pub title: String,
///     pub deleted: Option<String>,
/// }
///
/// impl SoftDeleteModel for Article {
///     fn table_name() -> &'static str {
///         "articles"
///     }
///
///     fn primary_key_fields() -> &'static [&'static str] {
///         &["id"]
///     }
///
///     fn is_new(&self) -> bool {
///         self.id.is_none()
///     }
/// }
/// ```
pub trait SoftDeleteModel:
    Clone + Send + Sync + Debug + Serialize + DeserializeOwned + 'static
{
    /// The table name in the database
    fn table_name() -> &'static str;

    /// Primary key column(s); every one must be populated for delete/restore
    fn primary_key_fields() -> &'static [&'static str];

    /// Deletion-marker column, when it differs from the configured default
    fn soft_delete_field() -> Option<&'static str> {
        None
    }

    /// Whether this record has never been persisted
    fn is_new(&self) -> bool;

    /// Current value of `column`, `None` when the record has no such field
    fn field_value(&self, column: &str) -> Option<Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut fields)) => fields.remove(column),
            _ => None,
        }
    }

    /// Overwrite `column` on the record
    fn set_field_value(&mut self, column: &str, value: Value) -> Result<(), StoreError> {
        let mut fields = to_object(self)?;
        fields.insert(column.to_string(), value);
        *self = serde_json::from_value(Value::Object(fields))?;
        Ok(())
    }

    /// Columns written by the save path: everything except the primary key
    fn save_fields(&self) -> Result<Vec<(String, Value)>, StoreError> {
        let keys = Self::primary_key_fields();
        Ok(to_object(self)?
            .into_iter()
            .filter(|(column, _)| !keys.contains(&column.as_str()))
            .collect())
    }
}

fn to_object<T: Serialize>(record: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(record)? {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::InvalidConfiguration {
            message: format!("record must serialize to a JSON object, got {}", other),
        }),
    }
}
