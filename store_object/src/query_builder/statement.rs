//! Statements handed to a `StatementExecutor`
//!
//! A statement is a table plus structured conditions; rendering to SQL is
//! deferred so non-SQL backends can evaluate the same tree.

use crate::query_builder::builder::QueryBuilder;
use crate::query_builder::filter::QueryFilter;
use crate::query_builder::sql_generation::SqlGenerator;
use crate::query_builder::update::UpdateSet;
use crate::validation::ValidatedTableName;
use serde_json::Value;

/// `UPDATE table SET ... WHERE ...`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub table: ValidatedTableName,
    pub set: UpdateSet,
    pub conditions: Vec<QueryFilter>,
}

/// `DELETE FROM table WHERE ...`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub table: ValidatedTableName,
    pub conditions: Vec<QueryFilter>,
}

/// Mutating statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Update(UpdateStatement),
    Delete(DeleteStatement),
}

impl Statement {
    pub fn update(table: ValidatedTableName, set: UpdateSet, conditions: Vec<QueryFilter>) -> Self {
        Statement::Update(UpdateStatement {
            table,
            set,
            conditions,
        })
    }

    pub fn delete(table: ValidatedTableName, conditions: Vec<QueryFilter>) -> Self {
        Statement::Delete(DeleteStatement { table, conditions })
    }

    pub fn table(&self) -> &ValidatedTableName {
        match self {
            Statement::Update(update) => &update.table,
            Statement::Delete(delete) => &delete.table,
        }
    }

    pub fn conditions(&self) -> &[QueryFilter] {
        match self {
            Statement::Update(update) => &update.conditions,
            Statement::Delete(delete) => &delete.conditions,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Update(_) => "update",
            Statement::Delete(_) => "delete",
        }
    }

    /// Render to SQL text and its parameters in placeholder order
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        match self {
            Statement::Update(update) => {
                let (set_clause, mut params) = SqlGenerator::build_set_clause(&update.set);
                let (where_clause, where_params) =
                    SqlGenerator::build_where_clause(&update.conditions, params.len() + 1);
                params.extend(where_params);
                (
                    join_clauses(&[
                        "UPDATE",
                        &update.table.quoted(),
                        &set_clause,
                        &where_clause,
                    ]),
                    params,
                )
            }
            Statement::Delete(delete) => {
                let (where_clause, params) = SqlGenerator::build_where_clause(&delete.conditions, 1);
                (
                    join_clauses(&["DELETE FROM", &delete.table.quoted(), &where_clause]),
                    params,
                )
            }
        }
    }
}

/// `SELECT * FROM table WHERE ... ORDER BY ... LIMIT ...`
#[derive(Debug, Clone)]
pub struct SelectStatement {
    pub table: ValidatedTableName,
    pub query: QueryBuilder,
}

impl SelectStatement {
    pub fn new(table: ValidatedTableName, query: QueryBuilder) -> Self {
        Self { table, query }
    }

    /// Rows rendered as one JSON object each
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let (where_clause, params) = SqlGenerator::build_where_clause(self.query.conditions(), 1);
        let inner = join_clauses(&[
            "SELECT * FROM",
            &self.table.quoted(),
            &where_clause,
            &SqlGenerator::build_order_clause(self.query.ordering()),
            &SqlGenerator::build_limit_clause(self.query.limit_value(), self.query.offset_value()),
        ]);
        (format!("SELECT row_to_json(t) AS row FROM ({}) t", inner), params)
    }

    /// Count of matching rows; ordering and pagination are ignored
    pub fn to_count_sql(&self) -> (String, Vec<Value>) {
        let (where_clause, params) = SqlGenerator::build_where_clause(self.query.conditions(), 1);
        (
            join_clauses(&[
                "SELECT COUNT(*) AS total FROM",
                &self.table.quoted(),
                &where_clause,
            ]),
            params,
        )
    }
}

fn join_clauses(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
