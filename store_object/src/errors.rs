use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The deletion-marker column is not part of the table schema
    #[error("Configured field `{column}` is missing from the table `{table}`.")]
    MissingColumn { table: String, column: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Database error on {table} during {operation}: {source}")]
    DatabaseOperation {
        table: String,
        operation: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid identifier: {0}")]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Failure reported by a cascade, rules or save collaborator
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    pub fn database_operation(table: &str, operation: &str, source: sqlx::Error) -> Self {
        Self::DatabaseOperation {
            table: table.to_string(),
            operation: operation.to_string(),
            source,
        }
    }

    pub fn missing_column(table: &str, column: &str) -> Self {
        Self::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    pub fn incomplete_primary_key(operation: &str) -> Self {
        Self::InvalidArgument(format!("{} requires all primary key values.", operation))
    }
}
