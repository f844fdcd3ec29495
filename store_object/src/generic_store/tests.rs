use super::SoftDeleteStore;
use crate::errors::StoreError;
use crate::memory::{MemoryExecutor, MemorySchema};
use crate::query_builder::{QueryBuilder, QueryFilter, SortOrder, Statement};
use crate::schema::ColumnInfo;
use crate::traits::{
    AssociationCascade, BulkOperations, CascadeOptions, DeleteOptions, RuleOperation,
    RulesChecker, SaveRecord, ScopedQuery, SoftDeletable, SoftDeleteModel,
};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use config::{RedeletePolicy, SoftDeleteConfig};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use signal_system::{EventType, HookOutcome, SignalManager};
use std::sync::{Arc, Mutex};

const ARTICLE_COLUMNS: &[&str] = &["id", "title", "status", "deleted", "deleted_by"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Article {
    id: Option<i64>,
    title: String,
    status: String,
    deleted: Option<String>,
    deleted_by: Option<String>,
}

impl SoftDeleteModel for Article {
    fn table_name() -> &'static str {
        "articles"
    }

    fn primary_key_fields() -> &'static [&'static str] {
        &["id"]
    }

    fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Translation {
    article_id: i64,
    locale: Option<String>,
    body: String,
    removed_at: Option<String>,
}

impl SoftDeleteModel for Translation {
    fn table_name() -> &'static str {
        "translations"
    }

    fn primary_key_fields() -> &'static [&'static str] {
        &["article_id", "locale"]
    }

    fn soft_delete_field() -> Option<&'static str> {
        Some("removed_at")
    }

    fn is_new(&self) -> bool {
        false
    }
}

fn article(id: i64) -> Article {
    Article {
        id: Some(id),
        title: format!("Article {}", id),
        status: "published".to_string(),
        deleted: None,
        deleted_by: None,
    }
}

fn seed(executor: &MemoryExecutor, id: i64, status: &str, deleted: Option<&str>) {
    executor
        .insert(
            "articles",
            json!({
                "id": id,
                "title": format!("Article {}", id),
                "status": status,
                "deleted": deleted,
                "deleted_by": null,
            }),
        )
        .unwrap();
}

fn row(executor: &MemoryExecutor, id: i64) -> serde_json::Map<String, Value> {
    executor.find_row("articles", "id", &json!(id)).unwrap()
}

struct Fixture {
    executor: Arc<MemoryExecutor>,
    schema: Arc<MemorySchema>,
    store: SoftDeleteStore<Article>,
}

async fn fixture_with(settings: SoftDeleteConfig, columns: &[&str]) -> Fixture {
    let executor = Arc::new(MemoryExecutor::new());
    let schema = Arc::new(MemorySchema::new());
    schema.define_table("articles", columns);

    let store = SoftDeleteStore::<Article>::open(executor.clone(), schema.clone(), settings)
        .await
        .unwrap();

    Fixture {
        executor,
        schema,
        store,
    }
}

async fn fixture() -> Fixture {
    fixture_with(SoftDeleteConfig::default(), ARTICLE_COLUMNS).await
}

fn updates(executor: &MemoryExecutor) -> Vec<Statement> {
    executor
        .statements()
        .into_iter()
        .filter(|statement| matches!(statement, Statement::Update(_)))
        .collect()
}

fn record_events(manager: &SignalManager) -> Arc<Mutex<Vec<signal_system::DatabaseEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    manager.add_callback(move |event| sink.lock().unwrap().push(event.clone()));
    events
}

struct StaticRules {
    allow_delete: bool,
    allow_update: bool,
}

#[async_trait]
impl RulesChecker<Article> for StaticRules {
    async fn check_rules(
        &self,
        _record: &Article,
        operation: RuleOperation,
        _options: &DeleteOptions,
    ) -> Result<bool, StoreError> {
        Ok(match operation {
            RuleOperation::Delete => self.allow_delete,
            RuleOperation::Update => self.allow_update,
        })
    }
}

/// Records each cascade call with the parent's marker as it was at that moment
struct RecordingCascade {
    executor: Arc<MemoryExecutor>,
    calls: Mutex<Vec<(CascadeOptions, Value)>>,
}

#[async_trait]
impl AssociationCascade<Article> for RecordingCascade {
    async fn cascade_delete(
        &self,
        record: &Article,
        options: &CascadeOptions,
    ) -> Result<(), StoreError> {
        let id = json!(record.id);
        let marker = self
            .executor
            .find_row("articles", "id", &id)
            .and_then(|row| row.get("deleted").cloned())
            .unwrap_or(Value::Null);
        self.calls.lock().unwrap().push((options.clone(), marker));
        Ok(())
    }
}

struct FailingCascade;

#[async_trait]
impl AssociationCascade<Article> for FailingCascade {
    async fn cascade_delete(&self, _: &Article, _: &CascadeOptions) -> Result<(), StoreError> {
        Err(anyhow::anyhow!("comments table is locked").into())
    }
}

#[derive(Default)]
struct RecordingSave {
    saved: Mutex<Vec<Article>>,
}

#[async_trait]
impl SaveRecord<Article> for RecordingSave {
    async fn save(&self, record: &Article) -> Result<bool, StoreError> {
        self.saved.lock().unwrap().push(record.clone());
        Ok(true)
    }
}

#[tokio::test]
async fn soft_delete_marks_row_with_timestamp_and_actor() {
    let f = fixture().await;
    seed(&f.executor, 7, "published", None);

    let deleted = f
        .store
        .soft_delete(&article(7), Some("alice"), DeleteOptions::default())
        .await
        .unwrap();

    assert!(deleted);
    let row = row(&f.executor, 7);
    let marker = row["deleted"].as_str().expect("marker should be set");
    assert!(DateTime::parse_from_rfc3339(marker).is_ok());
    assert_eq!(row["deleted_by"], json!("alice"));
    assert_eq!(updates(&f.executor).len(), 1);
}

#[tokio::test]
async fn absent_actor_is_recorded_as_null() {
    let f = fixture().await;
    seed(&f.executor, 7, "published", None);

    assert!(f
        .store
        .soft_delete(&article(7), None, DeleteOptions::default())
        .await
        .unwrap());
    assert_eq!(row(&f.executor, 7)["deleted_by"], Value::Null);
}

#[tokio::test]
async fn second_soft_delete_is_skipped_by_default() {
    let f = fixture().await;
    seed(&f.executor, 7, "published", None);

    assert!(f
        .store
        .soft_delete(&article(7), Some("alice"), DeleteOptions::default())
        .await
        .unwrap());
    let first_marker = row(&f.executor, 7)["deleted"].clone();

    assert!(!f
        .store
        .soft_delete(&article(7), Some("bob"), DeleteOptions::default())
        .await
        .unwrap());
    let row = row(&f.executor, 7);
    assert_eq!(row["deleted"], first_marker);
    assert_eq!(row["deleted_by"], json!("alice"));
}

#[tokio::test]
async fn refresh_policy_overwrites_an_existing_marker() {
    let settings = SoftDeleteConfig::default().with_redelete(RedeletePolicy::Refresh);
    let f = fixture_with(settings, ARTICLE_COLUMNS).await;
    seed(&f.executor, 7, "published", Some("2024-01-01T00:00:00Z"));

    assert!(f
        .store
        .soft_delete(&article(7), Some("bob"), DeleteOptions::default())
        .await
        .unwrap());

    let row = row(&f.executor, 7);
    assert_ne!(row["deleted"], json!("2024-01-01T00:00:00Z"));
    assert_eq!(row["deleted_by"], json!("bob"));
}

#[tokio::test]
async fn unsaved_record_is_not_deleted_and_issues_no_statement() {
    let f = fixture().await;
    let mut draft = article(1);
    draft.id = None;

    assert!(!f
        .store
        .soft_delete(&draft, Some("alice"), DeleteOptions::default())
        .await
        .unwrap());
    assert!(!f.store.hard_delete(&draft, Some("alice")).await.unwrap());
    assert!(!f.store.restore(&mut draft).await.unwrap());
    assert!(f.executor.statements().is_empty());
}

#[tokio::test]
async fn incomplete_composite_key_is_rejected() {
    let executor = Arc::new(MemoryExecutor::new());
    let schema = Arc::new(MemorySchema::new());
    schema.define_table("translations", &["article_id", "locale", "body", "removed_at"]);
    let store = SoftDeleteStore::<Translation>::open(
        executor.clone(),
        schema,
        SoftDeleteConfig::default(),
    )
    .await
    .unwrap();

    let mut record = Translation {
        article_id: 3,
        locale: None,
        body: "Hallo".to_string(),
        removed_at: None,
    };

    let err = store
        .soft_delete(&record, None, DeleteOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidArgument(_)));
    assert_eq!(
        err.to_string(),
        "Invalid argument: soft_delete requires all primary key values."
    );

    assert!(matches!(
        store.hard_delete(&record, None).await,
        Err(StoreError::InvalidArgument(_))
    ));
    assert!(matches!(
        store.restore(&mut record).await,
        Err(StoreError::InvalidArgument(_))
    ));
    assert!(executor.statements().is_empty());
}

#[tokio::test]
async fn composite_key_uses_configured_marker_column() {
    let executor = Arc::new(MemoryExecutor::new());
    let schema = Arc::new(MemorySchema::new());
    schema.define_table("translations", &["article_id", "locale", "body", "removed_at"]);
    executor
        .insert(
            "translations",
            json!({"article_id": 3, "locale": "de", "body": "Hallo", "removed_at": null}),
        )
        .unwrap();
    executor
        .insert(
            "translations",
            json!({"article_id": 3, "locale": "en", "body": "Hello", "removed_at": null}),
        )
        .unwrap();
    let store = SoftDeleteStore::<Translation>::open(
        executor.clone(),
        schema,
        SoftDeleteConfig::default(),
    )
    .await
    .unwrap();

    let record = Translation {
        article_id: 3,
        locale: Some("de".to_string()),
        body: "Hallo".to_string(),
        removed_at: None,
    };
    assert!(store
        .soft_delete(&record, None, DeleteOptions::default())
        .await
        .unwrap());

    let remaining = store.find(QueryBuilder::new()).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].locale.as_deref(), Some("en"));
}

#[tokio::test]
async fn failing_rules_prevent_the_delete() {
    let f = fixture().await;
    seed(&f.executor, 7, "published", None);
    let store = f.store.with_rules_checker(Arc::new(StaticRules {
        allow_delete: false,
        allow_update: true,
    }));

    assert!(!store
        .soft_delete(&article(7), Some("alice"), DeleteOptions::default())
        .await
        .unwrap());
    assert!(f.executor.statements().is_empty());

    // Skipping the check lets the delete through
    assert!(store
        .soft_delete(&article(7), Some("alice"), DeleteOptions::unchecked())
        .await
        .unwrap());
}

#[tokio::test]
async fn guard_stopping_with_false_prevents_the_update() {
    let f = fixture().await;
    seed(&f.executor, 7, "published", None);
    let manager = Arc::new(SignalManager::new());
    manager.add_guard(|_| HookOutcome::stop(false));
    let events = record_events(&manager);
    let store = f.store.with_signal_manager(manager);

    assert!(!store
        .soft_delete(&article(7), Some("alice"), DeleteOptions::default())
        .await
        .unwrap());
    assert!(f.executor.statements().is_empty());
    assert_eq!(row(&f.executor, 7)["deleted"], Value::Null);
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn guard_stopping_with_true_reports_success_without_side_effects() {
    let f = fixture().await;
    seed(&f.executor, 7, "published", None);
    let manager = Arc::new(SignalManager::new());
    manager.add_guard(|_| HookOutcome::stop(true));
    let cascade = Arc::new(RecordingCascade {
        executor: f.executor.clone(),
        calls: Mutex::new(Vec::new()),
    });
    let store = f
        .store
        .with_signal_manager(manager)
        .with_cascade(cascade.clone());

    assert!(store
        .soft_delete(&article(7), None, DeleteOptions::default())
        .await
        .unwrap());
    assert!(f.executor.statements().is_empty());
    assert!(cascade.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn events_surround_a_successful_delete() {
    let f = fixture().await;
    seed(&f.executor, 7, "published", None);
    let manager = Arc::new(SignalManager::new());
    let events = record_events(&manager);
    let store = f.store.with_signal_manager(manager);

    assert!(store
        .soft_delete(&article(7), Some("alice"), DeleteOptions::default())
        .await
        .unwrap());

    let events = events.lock().unwrap();
    let kinds: Vec<EventType> = events.iter().map(|event| event.event_type).collect();
    assert_eq!(kinds, vec![EventType::BeforeDelete, EventType::AfterDelete]);
    assert_eq!(events[0].table_name, "articles");
    assert_eq!(events[0].record_id.as_deref(), Some("7"));
    assert_eq!(events[0].option("actor"), Some(&json!("alice")));
    assert_eq!(events[0].option("check_rules"), Some(&json!(true)));
    assert_eq!(events[1].record["title"], json!("Article 7"));
}

#[tokio::test]
async fn zero_rows_affected_reports_false_without_after_event() {
    let f = fixture().await;
    let manager = Arc::new(SignalManager::new());
    let events = record_events(&manager);
    let store = f.store.with_signal_manager(manager);

    // No row with id 99 exists
    assert!(!store
        .soft_delete(&article(99), Some("alice"), DeleteOptions::default())
        .await
        .unwrap());

    let kinds: Vec<EventType> = events
        .lock()
        .unwrap()
        .iter()
        .map(|event| event.event_type)
        .collect();
    assert_eq!(kinds, vec![EventType::BeforeDelete]);
}

#[tokio::test]
async fn cascade_runs_before_the_parent_is_marked() {
    let f = fixture().await;
    seed(&f.executor, 7, "published", None);
    let cascade = Arc::new(RecordingCascade {
        executor: f.executor.clone(),
        calls: Mutex::new(Vec::new()),
    });
    let store = f.store.with_cascade(cascade.clone());

    assert!(store
        .soft_delete(&article(7), Some("alice"), DeleteOptions::default())
        .await
        .unwrap());

    let calls = cascade.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (options, marker_at_cascade) = &calls[0];
    assert!(!options.primary);
    assert!(options.check_rules);
    assert_eq!(options.actor.as_deref(), Some("alice"));
    assert_eq!(*marker_at_cascade, Value::Null);
}

#[tokio::test]
async fn cascade_failure_propagates_and_leaves_parent_active() {
    let f = fixture().await;
    seed(&f.executor, 7, "published", None);
    let store = f.store.with_cascade(Arc::new(FailingCascade));

    let err = store
        .soft_delete(&article(7), None, DeleteOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Other(_)));
    assert_eq!(row(&f.executor, 7)["deleted"], Value::Null);
}

#[tokio::test]
async fn missing_marker_column_is_reported_at_first_use() {
    let f = fixture_with(SoftDeleteConfig::default(), &["id", "title", "status"]).await;
    seed(&f.executor, 7, "published", None);

    let err = f
        .store
        .soft_delete(&article(7), None, DeleteOptions::default())
        .await
        .unwrap_err();
    match err {
        StoreError::MissingColumn { table, column } => {
            assert_eq!(table, "articles");
            assert_eq!(column, "deleted");
        }
        other => panic!("expected MissingColumn, got {:?}", other),
    }
    assert!(f.executor.statements().is_empty());

    // The column appears later; the next call sees it
    f.schema
        .add_column("articles", ColumnInfo::new("deleted", "timestamp with time zone", true));
    assert!(f
        .store
        .soft_delete(&article(7), None, DeleteOptions::default())
        .await
        .unwrap());

    f.schema.drop_column("articles", "deleted");
    assert!(matches!(
        f.store.count(QueryBuilder::new()).await,
        Err(StoreError::MissingColumn { .. })
    ));
}

#[tokio::test]
async fn actor_is_written_only_when_the_column_exists() {
    let f = fixture_with(SoftDeleteConfig::default(), &["id", "title", "status", "deleted"]).await;
    seed(&f.executor, 7, "published", None);
    assert!(f.store.capabilities().actor_field.is_none());

    assert!(f
        .store
        .soft_delete(&article(7), Some("alice"), DeleteOptions::default())
        .await
        .unwrap());

    let statements = updates(&f.executor);
    let Statement::Update(update) = &statements[0] else {
        panic!("expected an UPDATE");
    };
    assert!(update.set.get("deleted").is_some());
    assert!(update.set.get("deleted_by").is_none());
}

#[tokio::test]
async fn status_flag_is_set_on_delete_and_cleared_on_restore() {
    let mut columns = ARTICLE_COLUMNS.to_vec();
    columns.push("DEL_FLAG");
    let f = fixture_with(SoftDeleteConfig::default(), &columns).await;
    seed(&f.executor, 7, "published", None);
    assert!(f.store.capabilities().status_flag.is_some());

    assert!(f
        .store
        .soft_delete(&article(7), Some("alice"), DeleteOptions::default())
        .await
        .unwrap());
    assert_eq!(row(&f.executor, 7)["DEL_FLAG"], json!("D"));

    let mut record = article(7);
    assert!(f.store.restore(&mut record).await.unwrap());
    let row = row(&f.executor, 7);
    assert_eq!(row["DEL_FLAG"], Value::Null);
    assert_eq!(row["deleted"], Value::Null);
}

#[tokio::test]
async fn status_flag_detection_can_be_disabled() {
    let mut columns = ARTICLE_COLUMNS.to_vec();
    columns.push("DEL_FLAG");
    let f = fixture_with(SoftDeleteConfig::default().without_status_flag(), &columns).await;
    assert!(f.store.capabilities().status_flag.is_none());
}

#[tokio::test]
async fn soft_delete_all_marks_matching_rows_without_events() {
    let f = fixture().await;
    for id in 1..=3 {
        seed(&f.executor, id, "pending", None);
    }
    seed(&f.executor, 4, "published", None);
    let manager = Arc::new(SignalManager::new());
    let events = record_events(&manager);
    let store = f
        .store
        .with_signal_manager(manager)
        .with_rules_checker(Arc::new(StaticRules {
            allow_delete: false,
            allow_update: false,
        }));

    let affected = store
        .soft_delete_all(vec![QueryFilter::eq("status", json!("pending"))], Some("alice"))
        .await
        .unwrap();

    assert_eq!(affected, 3);
    for id in 1..=3 {
        let row = row(&f.executor, id);
        assert!(row["deleted"].is_string());
        assert_eq!(row["deleted_by"], json!("alice"));
    }
    assert_eq!(row(&f.executor, 4)["deleted"], Value::Null);
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn soft_delete_all_leaves_already_deleted_rows_alone() {
    let f = fixture().await;
    seed(&f.executor, 1, "pending", None);
    seed(&f.executor, 2, "pending", Some("2024-01-01T00:00:00Z"));

    let affected = f
        .store
        .soft_delete_all(vec![QueryFilter::eq("status", json!("pending"))], None)
        .await
        .unwrap();

    assert_eq!(affected, 1);
    assert_eq!(row(&f.executor, 2)["deleted"], json!("2024-01-01T00:00:00Z"));
}

#[tokio::test]
async fn hard_delete_removes_the_row() {
    let f = fixture().await;
    seed(&f.executor, 7, "published", None);
    seed(&f.executor, 8, "published", None);

    assert!(f.store.hard_delete(&article(7), Some("alice")).await.unwrap());

    assert!(f.executor.find_row("articles", "id", &json!(7)).is_none());
    assert!(f.executor.find_row("articles", "id", &json!(8)).is_some());
    let kinds: Vec<&str> = f.executor.statements().iter().map(Statement::kind).collect();
    assert_eq!(kinds, vec!["update", "delete"]);
}

#[tokio::test]
async fn hard_delete_purges_an_already_soft_deleted_row() {
    let f = fixture().await;
    seed(&f.executor, 7, "published", Some("2024-01-01T00:00:00Z"));

    assert!(f.store.hard_delete(&article(7), None).await.unwrap());
    assert!(f.executor.rows("articles").is_empty());
}

#[tokio::test]
async fn hard_delete_does_nothing_when_the_soft_delete_is_stopped() {
    let f = fixture().await;
    seed(&f.executor, 7, "published", None);
    let manager = Arc::new(SignalManager::new());
    manager.add_guard(|_| HookOutcome::stop(false));
    let store = f.store.with_signal_manager(manager);

    assert!(!store.hard_delete(&article(7), None).await.unwrap());
    assert_eq!(f.executor.rows("articles").len(), 1);
    assert!(f.executor.statements().is_empty());
}

#[tokio::test]
async fn hard_delete_of_a_missing_row_issues_no_delete() {
    let f = fixture().await;

    assert!(!f.store.hard_delete(&article(42), None).await.unwrap());
    assert!(f
        .executor
        .statements()
        .iter()
        .all(|statement| matches!(statement, Statement::Update(_))));
}

#[tokio::test]
async fn hard_delete_all_before_respects_the_cutoff() {
    let f = fixture().await;
    seed(&f.executor, 1, "published", Some("2024-01-01T00:00:00Z"));
    seed(&f.executor, 2, "published", Some("2024-06-01T00:00:00Z"));
    seed(&f.executor, 3, "published", None);
    seed(&f.executor, 4, "published", Some("2024-06-02T00:00:00Z"));

    let cutoff = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let purged = f.store.hard_delete_all_before(cutoff).await.unwrap();

    assert_eq!(purged, 2);
    let mut remaining: Vec<i64> = f
        .executor
        .rows("articles")
        .iter()
        .filter_map(|row| row["id"].as_i64())
        .collect();
    remaining.sort();
    assert_eq!(remaining, vec![3, 4]);
}

#[tokio::test]
async fn restore_clears_the_marker_and_can_repeat() {
    let f = fixture().await;
    seed(&f.executor, 7, "published", None);
    assert!(f
        .store
        .soft_delete(&article(7), Some("alice"), DeleteOptions::default())
        .await
        .unwrap());

    let mut record = f
        .store
        .find_one(QueryBuilder::new().only_trashed())
        .await
        .unwrap()
        .expect("trashed article");
    assert!(record.deleted.is_some());

    assert!(f.store.restore(&mut record).await.unwrap());
    assert!(record.deleted.is_none());
    assert_eq!(row(&f.executor, 7)["deleted"], Value::Null);

    assert!(f.store.restore(&mut record).await.unwrap());

    let active = f.store.find(QueryBuilder::new()).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, Some(7));
}

#[tokio::test]
async fn restore_routes_through_a_custom_save_path() {
    let f = fixture().await;
    seed(&f.executor, 7, "published", Some("2024-01-01T00:00:00Z"));
    let save = Arc::new(RecordingSave::default());
    let store = f.store.with_save_path(save.clone());

    let mut record = article(7);
    record.deleted = Some("2024-01-01T00:00:00Z".to_string());
    assert!(store.restore(&mut record).await.unwrap());

    let saved = save.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].deleted.is_none());
    assert!(f.executor.statements().is_empty());
}

#[tokio::test]
async fn restore_reruns_rules_as_an_update() {
    let f = fixture().await;
    seed(&f.executor, 7, "published", Some("2024-01-01T00:00:00Z"));
    let store = f.store.with_rules_checker(Arc::new(StaticRules {
        allow_delete: true,
        allow_update: false,
    }));

    let mut record = article(7);
    assert!(!store.restore(&mut record).await.unwrap());
    assert_eq!(row(&f.executor, 7)["deleted"], json!("2024-01-01T00:00:00Z"));
}

#[tokio::test]
async fn reads_are_scoped_to_active_rows_by_default() {
    let f = fixture().await;
    seed(&f.executor, 1, "published", None);
    seed(&f.executor, 2, "published", Some("2024-01-01T00:00:00Z"));
    seed(&f.executor, 3, "draft", None);

    let active = f
        .store
        .find(QueryBuilder::new().order_by("id", SortOrder::Asc))
        .await
        .unwrap();
    let ids: Vec<_> = active.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![Some(1), Some(3)]);

    assert_eq!(f.store.count(QueryBuilder::new()).await.unwrap(), 2);
    assert_eq!(f.store.count(QueryBuilder::new().with_trashed()).await.unwrap(), 3);
    assert_eq!(f.store.count(QueryBuilder::new().only_trashed()).await.unwrap(), 1);

    let published = f
        .store
        .count(QueryBuilder::new().filter(QueryFilter::eq("status", json!("published"))))
        .await
        .unwrap();
    assert_eq!(published, 1);

    let trashed = f
        .store
        .find_one(QueryBuilder::new().only_trashed())
        .await
        .unwrap();
    assert_eq!(trashed.and_then(|a| a.id), Some(2));
}
