//! In-process backend
//!
//! `MemoryExecutor` evaluates the same statement trees the PostgreSQL
//! executor renders, over rows held as JSON objects. `MemorySchema` is a
//! mutable column catalog. Together they run the engine without a database,
//! which is how the crate's own tests exercise it.

use crate::errors::StoreError;
use crate::executor::StatementExecutor;
use crate::query_builder::{
    LogicalOperator, QueryCondition, QueryFilter, QueryOperator, SelectStatement, SortOrder,
    Statement,
};
use crate::schema::{ColumnInfo, SchemaInspector, TableSchema};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;

type Row = Map<String, Value>;

fn poisoned() -> StoreError {
    StoreError::Database("memory backend lock poisoned".to_string())
}

/// Rows kept in memory, keyed by table name
#[derive(Debug, Default)]
pub struct MemoryExecutor {
    tables: RwLock<HashMap<String, Vec<Row>>>,
    log: RwLock<Vec<Statement>>,
}

impl MemoryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row; `row` must be a JSON object
    pub fn insert(&self, table: &str, row: Value) -> Result<(), StoreError> {
        let Value::Object(fields) = row else {
            return Err(StoreError::InvalidArgument(format!(
                "row for {} must be a JSON object",
                table
            )));
        };
        self.tables
            .write()
            .map_err(|_| poisoned())?
            .entry(table.to_string())
            .or_default()
            .push(fields);
        Ok(())
    }

    /// Snapshot of every row of `table`, soft-deleted or not
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .read()
            .map(|tables| tables.get(table).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    /// First row whose `column` equals `value`
    pub fn find_row(&self, table: &str, column: &str, value: &Value) -> Option<Row> {
        self.rows(table)
            .into_iter()
            .find(|row| row.get(column).is_some_and(|v| values_equal(v, value)))
    }

    /// Every mutating statement executed so far, in order
    pub fn statements(&self) -> Vec<Statement> {
        self.log.read().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn clear_statements(&self) {
        if let Ok(mut log) = self.log.write() {
            log.clear();
        }
    }
}

#[async_trait]
impl StatementExecutor for MemoryExecutor {
    async fn execute(&self, statement: &Statement) -> Result<u64, StoreError> {
        self.log.write().map_err(|_| poisoned())?.push(statement.clone());

        let mut tables = self.tables.write().map_err(|_| poisoned())?;
        let Some(rows) = tables.get_mut(statement.table().as_str()) else {
            return Ok(0);
        };

        match statement {
            Statement::Update(update) => {
                let mut affected = 0;
                for row in rows
                    .iter_mut()
                    .filter(|row| matches_all(row, &update.conditions))
                {
                    for (column, value) in update.set.iter() {
                        row.insert(column.clone(), value.clone());
                    }
                    affected += 1;
                }
                Ok(affected)
            }
            Statement::Delete(delete) => {
                let before = rows.len();
                rows.retain(|row| !matches_all(row, &delete.conditions));
                Ok((before - rows.len()) as u64)
            }
        }
    }

    async fn fetch_rows(&self, select: &SelectStatement) -> Result<Vec<Row>, StoreError> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        let mut rows: Vec<Row> = tables
            .get(select.table.as_str())
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_all(row, select.query.conditions()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        let ordering = select.query.ordering();
        if !ordering.is_empty() {
            rows.sort_by(|a, b| {
                ordering
                    .iter()
                    .map(|(field, order)| compare_for_sort(a.get(field), b.get(field), *order))
                    .find(|ord| *ord != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });
        }

        let offset = select.query.offset_value().unwrap_or(0).max(0) as usize;
        let limit = select
            .query
            .limit_value()
            .map(|limit| limit.max(0) as usize)
            .unwrap_or(usize::MAX);

        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn fetch_count(&self, select: &SelectStatement) -> Result<i64, StoreError> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        let count = tables
            .get(select.table.as_str())
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_all(row, select.query.conditions()))
                    .count()
            })
            .unwrap_or(0);
        Ok(count as i64)
    }
}

fn matches_all(row: &Row, filters: &[QueryFilter]) -> bool {
    filters.iter().all(|filter| matches_filter(row, filter))
}

fn matches_filter(row: &Row, filter: &QueryFilter) -> bool {
    match filter {
        QueryFilter::Condition(condition) => matches_condition(row, condition),
        QueryFilter::Group { operator, filters } => match operator {
            LogicalOperator::And => filters.iter().all(|f| matches_filter(row, f)),
            LogicalOperator::Or => filters.iter().any(|f| matches_filter(row, f)),
        },
    }
}

// NULL compares as unknown, so every comparison against it fails
fn matches_condition(row: &Row, condition: &QueryCondition) -> bool {
    let current = row.get(&condition.field).filter(|value| !value.is_null());
    let expected = condition.value.as_ref().filter(|value| !value.is_null());

    match condition.operator {
        QueryOperator::IsNull => current.is_none(),
        QueryOperator::IsNotNull => current.is_some(),
        QueryOperator::Eq if expected.is_none() => current.is_none(),
        QueryOperator::Ne if expected.is_none() => current.is_some(),
        QueryOperator::In | QueryOperator::NotIn => {
            let (Some(current), Some(Value::Array(candidates))) = (current, expected) else {
                return condition.operator == QueryOperator::NotIn
                    && matches!(expected, Some(Value::Array(c)) if c.is_empty());
            };
            let found = candidates.iter().any(|candidate| values_equal(current, candidate));
            if condition.operator == QueryOperator::In {
                found
            } else {
                !found
            }
        }
        operator => {
            let (Some(current), Some(expected)) = (current, expected) else {
                return false;
            };
            match operator {
                QueryOperator::Like | QueryOperator::ILike => {
                    let (Value::String(text), Value::String(pattern)) = (current, expected) else {
                        return false;
                    };
                    if operator == QueryOperator::ILike {
                        like(&text.to_lowercase(), &pattern.to_lowercase())
                    } else {
                        like(text, pattern)
                    }
                }
                _ => compare_values(current, expected).is_some_and(|ord| match operator {
                    QueryOperator::Eq => ord == Ordering::Equal,
                    QueryOperator::Ne => ord != Ordering::Equal,
                    QueryOperator::Gt => ord == Ordering::Greater,
                    QueryOperator::Gte => ord != Ordering::Less,
                    QueryOperator::Lt => ord == Ordering::Less,
                    QueryOperator::Lte => ord != Ordering::Greater,
                    _ => false,
                }),
            }
        }
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text).ok()
}

/// Order two JSON scalars the way the PostgreSQL executor's bound types would
fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => match (parse_timestamp(x), parse_timestamp(y)) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => Some(x.cmp(y)),
        },
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

// Integers compare exactly; f64 only when one side is a float
fn compare_numbers(x: &Number, y: &Number) -> Option<Ordering> {
    match (x.as_i64(), y.as_i64(), x.as_u64(), y.as_u64()) {
        (Some(a), Some(b), _, _) => Some(a.cmp(&b)),
        (_, _, Some(a), Some(b)) => Some(a.cmp(&b)),
        // Only one side exceeds i64::MAX
        (Some(_), None, _, Some(_)) => Some(Ordering::Less),
        (None, Some(_), Some(_), _) => Some(Ordering::Greater),
        _ => x.as_f64()?.partial_cmp(&y.as_f64()?),
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    compare_values(a, b) == Some(Ordering::Equal)
}

// ASC puts NULLs last and DESC puts them first, as PostgreSQL does
fn compare_for_sort(a: Option<&Value>, b: Option<&Value>, order: SortOrder) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    let ord = match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => compare_values(a, b).unwrap_or(Ordering::Equal),
    };
    match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    }
}

/// SQL LIKE with `%` and `_` wildcards
fn like(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    fn matches(text: &[char], pattern: &[char]) -> bool {
        match pattern.split_first() {
            None => text.is_empty(),
            Some(('%', rest)) => (0..=text.len()).any(|skip| matches(&text[skip..], rest)),
            Some(('_', rest)) => !text.is_empty() && matches(&text[1..], rest),
            Some((c, rest)) => text.first() == Some(c) && matches(&text[1..], rest),
        }
    }

    matches(&text, &pattern)
}

/// Column catalog kept in memory
#[derive(Debug, Default)]
pub struct MemorySchema {
    tables: RwLock<HashMap<String, TableSchema>>,
}

impl MemorySchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or replace) a table with nullable text columns
    pub fn define_table(&self, table: &str, columns: &[&str]) {
        let columns = columns
            .iter()
            .map(|name| ColumnInfo::new(name, "text", true))
            .collect();
        self.define(TableSchema::new(table, columns));
    }

    pub fn define(&self, schema: TableSchema) {
        if let Ok(mut tables) = self.tables.write() {
            tables.insert(schema.table.clone(), schema);
        }
    }

    pub fn add_column(&self, table: &str, column: ColumnInfo) {
        if let Ok(mut tables) = self.tables.write() {
            let schema = tables
                .entry(table.to_string())
                .or_insert_with(|| TableSchema::new(table, Vec::new()));
            schema.columns.retain(|existing| existing.name != column.name);
            schema.columns.push(column);
        }
    }

    pub fn drop_column(&self, table: &str, column: &str) {
        if let Ok(mut tables) = self.tables.write() {
            if let Some(schema) = tables.get_mut(table) {
                schema.columns.retain(|existing| existing.name != column);
            }
        }
    }
}

#[async_trait]
impl SchemaInspector for MemorySchema {
    async fn describe(&self, table: &str) -> Result<TableSchema, StoreError> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        Ok(tables
            .get(table)
            .cloned()
            .unwrap_or_else(|| TableSchema::new(table, Vec::new())))
    }
}
