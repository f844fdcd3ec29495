use super::soft_deletable::SoftDeletable;
use crate::errors::StoreError;
use crate::query_builder::QueryBuilder;
use async_trait::async_trait;

/// Read entry point; soft-deleted rows are excluded unless the query opts in
/// with `with_trashed()` or `only_trashed()`
#[async_trait]
pub trait ScopedQuery: SoftDeletable {
    async fn find(&self, query: QueryBuilder) -> Result<Vec<Self::Model>, StoreError>;

    async fn find_one(&self, query: QueryBuilder) -> Result<Option<Self::Model>, StoreError>;

    async fn count(&self, query: QueryBuilder) -> Result<i64, StoreError>;
}
