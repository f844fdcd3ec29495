//! Soft-delete column migration
//!
//! Adds the marker and actor columns, plus an index on the marker, to an
//! existing table. Every statement is idempotent.

use crate::core::SoftHaus;
use crate::errors::SoftHausError;
use store_object::validation::quote_identifier;
use store_object::{SoftDeleteModel, TableDescriptor, ValidatedFieldName};

/// DDL that prepares `descriptor`'s table for soft deletion.
///
/// The marker column is the model's own or `default_field`; the actor
/// column is added only when `actor_field` is given.
pub fn soft_delete_migration_sql(
    descriptor: &TableDescriptor,
    default_field: &str,
    actor_field: Option<&str>,
) -> Result<Vec<String>, SoftHausError> {
    let table = descriptor.table();
    let marker = ValidatedFieldName::new(descriptor.configured_field().unwrap_or(default_field))
        .map_err(store_object::StoreError::from)?;

    let mut statements = vec![format!(
        "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {} TIMESTAMPTZ NULL",
        table.quoted(),
        quote_identifier(marker.as_str())
    )];

    if let Some(actor_field) = actor_field {
        let actor = ValidatedFieldName::new(actor_field).map_err(store_object::StoreError::from)?;
        statements.push(format!(
            "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {} TEXT NULL",
            table.quoted(),
            quote_identifier(actor.as_str())
        ));
    }

    statements.push(format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
        quote_identifier(&format!("idx_{}_{}", table.as_str(), marker.as_str())),
        table.quoted(),
        quote_identifier(marker.as_str())
    ));

    Ok(statements)
}

impl SoftHaus {
    /// Add the soft-delete columns for `T` to its table
    pub async fn ensure_soft_delete_columns<T>(&self) -> Result<(), SoftHausError>
    where
        T: SoftDeleteModel,
    {
        let descriptor = TableDescriptor::of::<T>()?;
        let settings = self.settings();
        let statements = soft_delete_migration_sql(
            &descriptor,
            &settings.default_field,
            Some(&settings.actor_field),
        )?;

        let pool = self.pool()?;
        for sql in statements {
            crate::debug_log!("[MIGRATION] {}", sql);
            sqlx::query(&sql).execute(pool).await?;
        }

        tracing::info!(
            "[MIGRATION] Soft-delete columns ensured on {}",
            descriptor.table_name()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_adds_marker_actor_and_index() {
        let descriptor = TableDescriptor::new("articles", &["id"], None).unwrap();
        let statements = soft_delete_migration_sql(&descriptor, "deleted", Some("deleted_by")).unwrap();

        assert_eq!(
            statements,
            vec![
                "ALTER TABLE \"articles\" ADD COLUMN IF NOT EXISTS \"deleted\" TIMESTAMPTZ NULL",
                "ALTER TABLE \"articles\" ADD COLUMN IF NOT EXISTS \"deleted_by\" TEXT NULL",
                "CREATE INDEX IF NOT EXISTS \"idx_articles_deleted\" ON \"articles\" (\"deleted\")",
            ]
        );
    }

    #[test]
    fn model_marker_overrides_the_default() {
        let descriptor = TableDescriptor::new("translations", &["article_id", "locale"], Some("removed_at")).unwrap();
        let statements = soft_delete_migration_sql(&descriptor, "deleted", None).unwrap();

        assert_eq!(statements.len(), 2);
        assert!(statements[0].contains("\"removed_at\" TIMESTAMPTZ NULL"));
        assert!(statements[1].contains("\"idx_translations_removed_at\""));
    }

    #[test]
    fn unsafe_default_field_is_rejected() {
        let descriptor = TableDescriptor::new("articles", &["id"], None).unwrap();
        assert!(matches!(
            soft_delete_migration_sql(&descriptor, "deleted; DROP TABLE articles", None),
            Err(SoftHausError::Store(store_object::StoreError::Validation(_)))
        ));
    }
}
