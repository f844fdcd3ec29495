//! Single-record soft delete
//!
//! Rules, before-delete guards, cascade, marking and the after-delete
//! notification, in that order.

use super::core::SoftDeleteStore;
use crate::errors::StoreError;
use crate::query_builder::{QueryFilter, Statement};
use crate::table::record_id;
use crate::traits::{
    CascadeOptions, DeleteOptions, RuleOperation, SoftDeletable, SoftDeleteModel,
};
use async_trait::async_trait;
use config::RedeletePolicy;
use signal_system::EventType;

impl<T: SoftDeleteModel> SoftDeleteStore<T> {
    pub(crate) async fn soft_delete_with_policy(
        &self,
        record: &T,
        actor: Option<&str>,
        options: DeleteOptions,
        redelete: RedeletePolicy,
    ) -> Result<bool, StoreError> {
        let table = self.descriptor.table_name();

        if record.is_new() {
            tracing::debug!("[SOFT_DELETE] Table: {}, record is not persisted", table);
            return Ok(false);
        }

        let key = self.descriptor.primary_key_values(record, "soft_delete")?;
        let id = record_id(&key);

        if options.check_rules {
            if let Some(rules) = &self.rules {
                if !rules
                    .check_rules(record, RuleOperation::Delete, &options)
                    .await?
                {
                    tracing::debug!("[SOFT_DELETE] Table: {}, ID: {}, rules failed", table, id);
                    return Ok(false);
                }
            }
        }

        let before = self.delete_event(EventType::BeforeDelete, record, &id, actor, &options)?;
        if let Some(result) = self.dispatch(before).short_circuit_result() {
            tracing::debug!(
                "[SOFT_DELETE] Table: {}, ID: {}, stopped by guard with {}",
                table,
                id,
                result
            );
            return Ok(result);
        }

        if let Some(cascade) = &self.cascade {
            let cascade_options = CascadeOptions {
                primary: false,
                check_rules: options.check_rules,
                actor: actor.map(str::to_string),
            };
            cascade.cascade_delete(record, &cascade_options).await?;
        }

        let marker = self.resolve_field().await?;

        let mut conditions = QueryFilter::all_eq(key);
        if redelete == RedeletePolicy::Skip {
            conditions.push(QueryFilter::is_null(&marker));
        }

        let statement = Statement::update(
            self.descriptor.table().clone(),
            self.deletion_set(&marker, actor),
            conditions,
        );

        tracing::debug!(
            "[SOFT_DELETE] Table: {}, ID: {}, marker: {}, actor: {:?}",
            table,
            id,
            marker,
            actor
        );

        let affected = self.executor.execute(&statement).await?;
        if affected == 0 {
            tracing::warn!(
                "[SOFT_DELETE] Table: {}, ID: {}, no row updated (missing or already deleted)",
                table,
                id
            );
            return Ok(false);
        }

        let after = self.delete_event(EventType::AfterDelete, record, &id, actor, &options)?;
        self.dispatch(after);

        Ok(true)
    }
}

#[async_trait]
impl<T: SoftDeleteModel> SoftDeletable for SoftDeleteStore<T> {
    type Model = T;

    async fn soft_delete(
        &self,
        record: &Self::Model,
        actor: Option<&str>,
        options: DeleteOptions,
    ) -> Result<bool, StoreError> {
        self.soft_delete_with_policy(record, actor, options, self.settings.redelete)
            .await
    }
}
