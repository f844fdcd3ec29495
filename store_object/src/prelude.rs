//! Convenience re-exports for common store-object usage

// Core traits
pub use crate::traits::{
    AssociationCascade, BulkOperations, CascadeOptions, DeleteOptions, RuleOperation,
    RulesChecker, SaveRecord, ScopedQuery, SoftDeletable, SoftDeleteModel,
};

// Error types
pub use crate::errors::StoreError;

// Core store functionality
pub use crate::generic_store::SoftDeleteStore;
pub use crate::table::{TableCapabilities, TableDescriptor};

// Backends
pub use crate::executor::{PgExecutor, StatementExecutor};
pub use crate::memory::{MemoryExecutor, MemorySchema};
pub use crate::schema::{PgSchemaInspector, SchemaInspector};

// Validation
pub use crate::validation::{ValidatedFieldName, ValidatedTableName, ValidationError};

// Query building
pub use crate::query_builder::{QueryBuilder, QueryFilter, SortOrder, TrashedScope};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use sqlx::PgPool;
