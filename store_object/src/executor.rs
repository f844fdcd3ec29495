//! Statement execution
//!
//! `StatementExecutor` is the seam between the engine and a database. The
//! PostgreSQL executor renders statements with `SqlGenerator` and runs them
//! through sqlx.

use crate::errors::StoreError;
use crate::query_builder::{SelectStatement, Statement};
use crate::DbPool;
use async_trait::async_trait;
use serde_json::{Map, Value};

#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Run an UPDATE or DELETE; returns the number of rows affected
    async fn execute(&self, statement: &Statement) -> Result<u64, StoreError>;

    /// Rows matching a SELECT, one JSON object per row
    async fn fetch_rows(
        &self,
        select: &SelectStatement,
    ) -> Result<Vec<Map<String, Value>>, StoreError>;

    async fn fetch_count(&self, select: &SelectStatement) -> Result<i64, StoreError>;
}

// Bind a JSON parameter with the closest PostgreSQL type
macro_rules! bind_json_param {
    ($query:expr, $param:expr) => {
        match $param {
            serde_json::Value::String(s) => {
                // Try to parse as RFC3339 timestamp first
                if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                    $query.bind(dt.with_timezone(&chrono::Utc))
                // Try to parse as UUID
                } else if let Ok(uuid) = uuid::Uuid::parse_str(&s) {
                    $query.bind(uuid)
                } else {
                    $query.bind(s)
                }
            }
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                        $query.bind(i as i32)
                    } else {
                        $query.bind(i)
                    }
                } else if let Some(f) = n.as_f64() {
                    $query.bind(f)
                } else {
                    $query.bind(n.to_string())
                }
            }
            serde_json::Value::Bool(b) => $query.bind(b),
            serde_json::Value::Null => $query.bind(Option::<String>::None),
            other => $query.bind(sqlx::types::Json(other)),
        }
    };
}

/// Executes statements against a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgExecutor {
    pool: DbPool,
}

impl PgExecutor {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl StatementExecutor for PgExecutor {
    async fn execute(&self, statement: &Statement) -> Result<u64, StoreError> {
        let (sql, params) = statement.to_sql();
        tracing::debug!("[EXECUTE] Table: {}", statement.table());
        tracing::debug!("[EXECUTE] SQL: {}", sql);
        tracing::debug!("[EXECUTE] Params count: {}", params.len());

        let mut query = sqlx::query(&sql);
        for param in params {
            query = bind_json_param!(query, param);
        }

        let result = query.execute(&self.pool).await.map_err(|e| {
            StoreError::database_operation(statement.table().as_str(), statement.kind(), e)
        })?;

        Ok(result.rows_affected())
    }

    async fn fetch_rows(
        &self,
        select: &SelectStatement,
    ) -> Result<Vec<Map<String, Value>>, StoreError> {
        let (sql, params) = select.to_sql();
        tracing::debug!("[SELECT] SQL: {}", sql);

        let mut query = sqlx::query_scalar::<_, Value>(&sql);
        for param in params {
            query = bind_json_param!(query, param);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::database_operation(select.table.as_str(), "select", e))?;

        rows.into_iter()
            .map(|row| match row {
                Value::Object(fields) => Ok(fields),
                other => Err(StoreError::Database(format!(
                    "expected a JSON object per row, got {}",
                    other
                ))),
            })
            .collect()
    }

    async fn fetch_count(&self, select: &SelectStatement) -> Result<i64, StoreError> {
        let (sql, params) = select.to_count_sql();
        tracing::debug!("[COUNT] SQL: {}", sql);

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for param in params {
            query = bind_json_param!(query, param);
        }

        query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::database_operation(select.table.as_str(), "count", e))
    }
}
