//! Collaborator interfaces the orchestrator drives but does not implement

use crate::errors::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Options of a single-record delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOptions {
    /// Run the configured rules checker before deleting
    pub check_rules: bool,
}

impl Default for DeleteOptions {
    fn default() -> Self {
        Self { check_rules: true }
    }
}

impl DeleteOptions {
    pub fn unchecked() -> Self {
        Self { check_rules: false }
    }
}

/// Options passed to the association layer when cascading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeOptions {
    /// Always `false` from the orchestrator: only dependents are affected
    pub primary: bool,
    pub check_rules: bool,
    pub actor: Option<String>,
}

/// Kind of operation a rules check guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleOperation {
    Delete,
    Update,
}

/// Domain rules evaluated before a delete or a save
#[async_trait]
pub trait RulesChecker<T>: Send + Sync {
    async fn check_rules(
        &self,
        record: &T,
        operation: RuleOperation,
        options: &DeleteOptions,
    ) -> Result<bool, StoreError>;
}

/// Deletes or detaches records that depend on a parent being deleted
#[async_trait]
pub trait AssociationCascade<T>: Send + Sync {
    async fn cascade_delete(&self, record: &T, options: &CascadeOptions) -> Result<(), StoreError>;
}

/// Persistence path used by restore
#[async_trait]
pub trait SaveRecord<T>: Send + Sync {
    async fn save(&self, record: &T) -> Result<bool, StoreError>;
}
