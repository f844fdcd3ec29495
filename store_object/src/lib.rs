//! Store Object - soft-delete engine for SoftHaus
//!
//! This crate provides the record model, schema inspection, deletion-field
//! resolution, statement building and the soft-delete store with its bulk
//! operations and scoped reads.

pub mod errors;
pub mod executor;
pub mod generic_store;
pub mod memory;
pub mod prelude;
pub mod query_builder;
pub mod schema;
pub mod table;
pub mod traits;
pub mod validation;

pub use errors::StoreError;
pub use executor::{PgExecutor, StatementExecutor};
pub use generic_store::SoftDeleteStore;
pub use memory::{MemoryExecutor, MemorySchema};
pub use query_builder::{QueryBuilder, QueryFilter, QueryOperator, SortOrder, TrashedScope};
pub use schema::{ColumnInfo, PgSchemaInspector, SchemaInspector, TableSchema};
pub use table::{SoftDeleteFieldResolver, StatusFlag, TableCapabilities, TableDescriptor};
pub use traits::*;
pub use validation::{ValidatedFieldName, ValidatedTableName, ValidationError};

use sqlx::PgPool;

pub type DbPool = PgPool;
