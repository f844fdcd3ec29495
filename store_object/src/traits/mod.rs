//! Traits for soft-delete operations
//!
//! This module contains the traits that define the record model, the store
//! operations and the collaborators the store drives.

pub mod collaborators;
pub mod model;
pub mod scoped_query;
pub mod soft_deletable;

pub use collaborators::{
    AssociationCascade, CascadeOptions, DeleteOptions, RuleOperation, RulesChecker, SaveRecord,
};
pub use model::SoftDeleteModel;
pub use scoped_query::ScopedQuery;
pub use soft_deletable::{BulkOperations, SoftDeletable};
