use super::core::SoftDeleteStore;
use crate::errors::StoreError;
use crate::query_builder::{QueryFilter, Statement, UpdateSet};
use crate::table::record_id;
use crate::traits::{BulkOperations, DeleteOptions, RuleOperation, SoftDeleteModel};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use config::RedeletePolicy;
use serde_json::Value;

impl<T: SoftDeleteModel> SoftDeleteStore<T> {
    /// Built-in save path: re-check rules as an update, then write every
    /// non-key column of `record` by primary key
    pub async fn save(&self, record: &T) -> Result<bool, StoreError> {
        self.save_with(record, UpdateSet::new()).await
    }

    async fn save_with(&self, record: &T, overrides: UpdateSet) -> Result<bool, StoreError> {
        let table = self.descriptor.table_name();
        let key = self.descriptor.primary_key_values(record, "save")?;

        if let Some(rules) = &self.rules {
            if !rules
                .check_rules(record, RuleOperation::Update, &DeleteOptions::default())
                .await?
            {
                tracing::debug!("[SAVE] Table: {}, ID: {}, rules failed", table, record_id(&key));
                return Ok(false);
            }
        }

        let mut set = UpdateSet::new();
        for (column, value) in record.save_fields()? {
            set.insert(column, value);
        }
        let set = set.merge(overrides);
        if set.is_empty() {
            return Ok(true);
        }

        tracing::debug!("[SAVE] Table: {}, ID: {}, columns: {}", table, record_id(&key), set.len());

        let statement = Statement::update(
            self.descriptor.table().clone(),
            set,
            QueryFilter::all_eq(key),
        );
        Ok(self.executor.execute(&statement).await? > 0)
    }
}

#[async_trait]
impl<T: SoftDeleteModel> BulkOperations for SoftDeleteStore<T> {
    async fn soft_delete_all(
        &self,
        conditions: Vec<QueryFilter>,
        actor: Option<&str>,
    ) -> Result<u64, StoreError> {
        let marker = self.resolve_field().await?;

        let mut conditions = conditions;
        if self.settings.redelete == RedeletePolicy::Skip {
            conditions.push(QueryFilter::is_null(&marker));
        }

        let statement = Statement::update(
            self.descriptor.table().clone(),
            self.deletion_set(&marker, actor),
            conditions,
        );

        let affected = self.executor.execute(&statement).await?;
        tracing::debug!(
            "[SOFT_DELETE_ALL] Table: {}, actor: {:?}, rows: {}",
            self.descriptor.table_name(),
            actor,
            affected
        );
        Ok(affected)
    }

    async fn hard_delete(&self, record: &T, actor: Option<&str>) -> Result<bool, StoreError> {
        if !self
            .soft_delete_with_policy(record, actor, DeleteOptions::default(), RedeletePolicy::Refresh)
            .await?
        {
            return Ok(false);
        }

        let conditions = self.descriptor.primary_key_conditions(record, "hard_delete")?;
        let statement = Statement::delete(self.descriptor.table().clone(), conditions);
        let affected = self.executor.execute(&statement).await?;

        tracing::debug!(
            "[HARD_DELETE] Table: {}, rows: {}",
            self.descriptor.table_name(),
            affected
        );
        Ok(affected > 0)
    }

    async fn hard_delete_all_before(&self, cutoff: DateTime<Utc>) -> Result<u64, StoreError> {
        let marker = self.resolve_field().await?;
        let conditions = vec![
            QueryFilter::is_not_null(&marker),
            QueryFilter::lte(
                &marker,
                Value::String(cutoff.to_rfc3339_opts(SecondsFormat::Micros, true)),
            ),
        ];

        let statement = Statement::delete(self.descriptor.table().clone(), conditions);
        let affected = self.executor.execute(&statement).await?;

        tracing::debug!(
            "[HARD_DELETE_BEFORE] Table: {}, cutoff: {}, rows: {}",
            self.descriptor.table_name(),
            cutoff,
            affected
        );
        Ok(affected)
    }

    async fn restore(&self, record: &mut T) -> Result<bool, StoreError> {
        if record.is_new() {
            tracing::debug!(
                "[RESTORE] Table: {}, record is not persisted",
                self.descriptor.table_name()
            );
            return Ok(false);
        }

        self.descriptor.primary_key_values(record, "restore")?;
        let marker = self.resolve_field().await?;

        let restored = self.restoration_set(&marker);
        for (column, value) in restored.iter() {
            record.set_field_value(column, value.clone())?;
        }

        match &self.save_path {
            Some(save_path) => save_path.save(record).await,
            None => self.save_with(record, restored).await,
        }
    }
}
