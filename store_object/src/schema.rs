//! Schema inspection
//!
//! The engine only needs to know which columns a table has. The PostgreSQL
//! inspector reads `information_schema`; see `memory::MemorySchema` for the
//! in-process variant.

use crate::errors::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};

/// One column of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
}

impl ColumnInfo {
    pub fn new(name: &str, data_type: &str, nullable: bool) -> Self {
        Self {
            name: name.to_string(),
            data_type: data_type.to_string(),
            nullable,
        }
    }
}

/// Column set of a table at the time it was described
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub table: String,
    pub columns: Vec<ColumnInfo>,
}

impl TableSchema {
    pub fn new(table: &str, columns: Vec<ColumnInfo>) -> Self {
        Self {
            table: table.to_string(),
            columns,
        }
    }

    /// Look a column up by exact name
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }
}

#[async_trait]
pub trait SchemaInspector: Send + Sync {
    /// Describe the current columns of `table`; an unknown table has no columns
    async fn describe(&self, table: &str) -> Result<TableSchema, StoreError>;

    async fn column(&self, table: &str, column: &str) -> Result<Option<ColumnInfo>, StoreError> {
        let schema = self.describe(table).await?;
        Ok(schema.column(column).cloned())
    }
}

/// Reads column metadata from `information_schema.columns` of the current schema
#[derive(Debug, Clone)]
pub struct PgSchemaInspector {
    pool: PgPool,
}

impl PgSchemaInspector {
    const DESCRIBE_SQL: &'static str = "SELECT column_name::text AS column_name, data_type::text AS data_type, \
         is_nullable::text AS is_nullable \
         FROM information_schema.columns \
         WHERE table_schema = current_schema() AND table_name = $1 \
         ORDER BY ordinal_position";

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaInspector for PgSchemaInspector {
    async fn describe(&self, table: &str) -> Result<TableSchema, StoreError> {
        let rows = sqlx::query(Self::DESCRIBE_SQL)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::database_operation(table, "describe", e))?;

        let columns = rows
            .iter()
            .map(|row| {
                let is_nullable: String = row.get("is_nullable");
                ColumnInfo {
                    name: row.get("column_name"),
                    data_type: row.get("data_type"),
                    nullable: is_nullable == "YES",
                }
            })
            .collect();

        tracing::debug!("[SCHEMA] Described table {}", table);
        Ok(TableSchema::new(table, columns))
    }
}
