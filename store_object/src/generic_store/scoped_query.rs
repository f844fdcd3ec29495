//! Scoped reads
//!
//! Every read resolves the marker column and applies the query's
//! `TrashedScope` before anything reaches the executor.

use super::core::SoftDeleteStore;
use crate::errors::StoreError;
use crate::query_builder::{QueryBuilder, SelectStatement};
use crate::traits::{ScopedQuery, SoftDeleteModel};
use async_trait::async_trait;
use serde_json::Value;

impl<T: SoftDeleteModel> SoftDeleteStore<T> {
    async fn scoped_select(&self, query: QueryBuilder) -> Result<SelectStatement, StoreError> {
        let marker = self.resolve_field().await?;
        tracing::debug!(
            "[FIND] Table: {}, scope: {:?}",
            self.descriptor.table_name(),
            query.scope()
        );
        Ok(SelectStatement::new(
            self.descriptor.table().clone(),
            query.scoped(&marker),
        ))
    }
}

#[async_trait]
impl<T: SoftDeleteModel> ScopedQuery for SoftDeleteStore<T> {
    async fn find(&self, query: QueryBuilder) -> Result<Vec<T>, StoreError> {
        let select = self.scoped_select(query).await?;
        let rows = self.executor.fetch_rows(&select).await?;

        rows.into_iter()
            .map(|row| serde_json::from_value(Value::Object(row)).map_err(StoreError::from))
            .collect()
    }

    async fn find_one(&self, query: QueryBuilder) -> Result<Option<T>, StoreError> {
        Ok(self.find(query.limit(1)).await?.into_iter().next())
    }

    async fn count(&self, query: QueryBuilder) -> Result<i64, StoreError> {
        let select = self.scoped_select(query).await?;
        self.executor.fetch_count(&select).await
    }
}
