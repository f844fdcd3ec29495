//! Trait definitions
//!
//! This module defines the soft-delete operations of a store.

use super::collaborators::DeleteOptions;
use crate::errors::StoreError;
use crate::query_builder::QueryFilter;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Single-record soft delete (the full protocol with rules, events and cascade)
#[async_trait]
pub trait SoftDeletable: Send + Sync {
    type Model: Send + Sync;

    /// Mark `record` deleted on behalf of `actor`.
    ///
    /// `Ok(false)` covers an unsaved record, failed rules, a guard that
    /// stopped with `false`, and an UPDATE that matched no row.
    async fn soft_delete(
        &self,
        record: &Self::Model,
        actor: Option<&str>,
        options: DeleteOptions,
    ) -> Result<bool, StoreError>;
}

/// Set-oriented operations; none of them dispatch per-record events
#[async_trait]
pub trait BulkOperations: SoftDeletable {
    /// Mark every row matching `conditions`; returns the affected row count
    async fn soft_delete_all(
        &self,
        conditions: Vec<QueryFilter>,
        actor: Option<&str>,
    ) -> Result<u64, StoreError>;

    /// Soft delete, then physically remove the row
    async fn hard_delete(&self, record: &Self::Model, actor: Option<&str>) -> Result<bool, StoreError>;

    /// Physically remove rows soft-deleted at or before `cutoff`
    async fn hard_delete_all_before(&self, cutoff: DateTime<Utc>) -> Result<u64, StoreError>;

    /// Clear the marker and persist the record through the save path
    async fn restore(&self, record: &mut Self::Model) -> Result<bool, StoreError>;
}
