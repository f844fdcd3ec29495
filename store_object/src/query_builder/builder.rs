//! Query builder utilities
//!
//! This module provides the read-side query description handed to a
//! store's `find`/`count` entry points.

use crate::query_builder::filter::QueryFilter;
use crate::query_builder::ordering::SortOrder;

/// Which rows a read sees with respect to the deletion marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrashedScope {
    /// Only rows whose marker is NULL
    #[default]
    Active,
    /// Every row, soft-deleted or not
    Include,
    /// Only soft-deleted rows
    Only,
}

impl TrashedScope {
    /// The condition this scope adds on `marker_field`, if any
    pub fn filter(&self, marker_field: &str) -> Option<QueryFilter> {
        match self {
            TrashedScope::Active => Some(QueryFilter::is_null(marker_field)),
            TrashedScope::Include => None,
            TrashedScope::Only => Some(QueryFilter::is_not_null(marker_field)),
        }
    }
}

/// Query builder for constructing database queries
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    pub(crate) conditions: Vec<QueryFilter>,
    pub(crate) order_by: Vec<(String, SortOrder)>,
    pub(crate) limit: Option<i64>,
    pub(crate) offset: Option<i64>,
    pub(crate) scope: TrashedScope,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter condition
    pub fn filter(mut self, filter: QueryFilter) -> Self {
        self.conditions.push(filter);
        self
    }

    /// Add multiple filters (combined with AND)
    pub fn filters(mut self, filters: Vec<QueryFilter>) -> Self {
        self.conditions.extend(filters);
        self
    }

    /// Add ordering
    pub fn order_by(mut self, field: &str, order: SortOrder) -> Self {
        self.order_by.push((field.to_string(), order));
        self
    }

    /// Add limit; negative values are clamped to 0
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit.max(0));
        self
    }

    /// Add offset; negative values are clamped to 0
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset.max(0));
        self
    }

    /// Include soft-deleted rows in the results
    pub fn with_trashed(mut self) -> Self {
        self.scope = TrashedScope::Include;
        self
    }

    /// Return soft-deleted rows only
    pub fn only_trashed(mut self) -> Self {
        self.scope = TrashedScope::Only;
        self
    }

    pub fn scope(&self) -> TrashedScope {
        self.scope
    }

    pub fn conditions(&self) -> &[QueryFilter] {
        &self.conditions
    }

    pub fn ordering(&self) -> &[(String, SortOrder)] {
        &self.order_by
    }

    pub fn limit_value(&self) -> Option<i64> {
        self.limit
    }

    pub fn offset_value(&self) -> Option<i64> {
        self.offset
    }

    /// Resolve the scope into a concrete condition on `marker_field`.
    ///
    /// The returned builder carries `TrashedScope::Include` so applying it
    /// twice adds nothing.
    pub fn scoped(mut self, marker_field: &str) -> Self {
        if let Some(filter) = self.scope.filter(marker_field) {
            self.conditions.push(filter);
        }
        self.scope = TrashedScope::Include;
        self
    }
}
