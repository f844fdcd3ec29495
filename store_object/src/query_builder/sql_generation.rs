//! SQL rendering for PostgreSQL
//!
//! Identifiers are quoted; values travel as `$n` parameters.

use crate::query_builder::filter::{LogicalOperator, QueryCondition, QueryFilter, QueryOperator};
use crate::query_builder::ordering::SortOrder;
use crate::query_builder::update::UpdateSet;
use crate::validation::quote_identifier;
use serde_json::Value;

pub struct SqlGenerator;

impl SqlGenerator {
    /// Build WHERE clause from conditions, numbering parameters from `first_param`
    pub fn build_where_clause(conditions: &[QueryFilter], first_param: usize) -> (String, Vec<Value>) {
        if conditions.is_empty() {
            return (String::new(), Vec::new());
        }

        let mut values = Vec::new();
        let mut param_counter = first_param;

        let conditions_sql = conditions
            .iter()
            .map(|condition| Self::build_condition_sql(condition, &mut values, &mut param_counter))
            .collect::<Vec<_>>()
            .join(" AND ");

        (format!("WHERE {}", conditions_sql), values)
    }

    /// Build SET clause; parameters start at `$1`.
    ///
    /// NULL is written as a literal: a bound NULL carries a concrete type
    /// and PostgreSQL rejects it for columns of another type.
    pub fn build_set_clause(set: &UpdateSet) -> (String, Vec<Value>) {
        let mut values = Vec::with_capacity(set.len());
        let mut param_counter = 1;
        let assignments = set
            .iter()
            .map(|(field, value)| {
                if value.is_null() {
                    format!("{} = NULL", quote_identifier(field))
                } else {
                    let param = Self::next_param(value, &mut values, &mut param_counter);
                    format!("{} = {}", quote_identifier(field), param)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        (format!("SET {}", assignments), values)
    }

    fn build_condition_sql(
        filter: &QueryFilter,
        values: &mut Vec<Value>,
        param_counter: &mut usize,
    ) -> String {
        match filter {
            QueryFilter::Condition(condition) => {
                Self::build_single_condition_sql(condition, values, param_counter)
            }
            QueryFilter::Group { operator, filters } => {
                if filters.is_empty() {
                    return match operator {
                        LogicalOperator::And => "1=1".to_string(),
                        LogicalOperator::Or => "1=0".to_string(),
                    };
                }

                let operator_str = match operator {
                    LogicalOperator::And => " AND ",
                    LogicalOperator::Or => " OR ",
                };

                let group_conditions = filters
                    .iter()
                    .map(|f| Self::build_condition_sql(f, values, param_counter))
                    .collect::<Vec<_>>()
                    .join(operator_str);

                format!("({})", group_conditions)
            }
        }
    }

    fn next_param(value: &Value, values: &mut Vec<Value>, param_counter: &mut usize) -> String {
        values.push(value.clone());
        let param = format!("${}", param_counter);
        *param_counter += 1;
        param
    }

    fn build_single_condition_sql(
        condition: &QueryCondition,
        values: &mut Vec<Value>,
        param_counter: &mut usize,
    ) -> String {
        let field = quote_identifier(&condition.field);

        let binary = |symbol: &str, values: &mut Vec<Value>, param_counter: &mut usize| match &condition.value {
            Some(value) => {
                let param = Self::next_param(value, values, param_counter);
                format!("{} {} {}", field, symbol, param)
            }
            None => "1=0".to_string(), // Invalid condition
        };

        match condition.operator {
            QueryOperator::Eq => match &condition.value {
                Some(Value::Null) | None => format!("{} IS NULL", field),
                Some(_) => binary("=", values, param_counter),
            },
            QueryOperator::Ne => match &condition.value {
                Some(Value::Null) | None => format!("{} IS NOT NULL", field),
                Some(_) => binary("!=", values, param_counter),
            },
            QueryOperator::Gt => binary(">", values, param_counter),
            QueryOperator::Gte => binary(">=", values, param_counter),
            QueryOperator::Lt => binary("<", values, param_counter),
            QueryOperator::Lte => binary("<=", values, param_counter),
            QueryOperator::Like => binary("LIKE", values, param_counter),
            QueryOperator::ILike => binary("ILIKE", values, param_counter),
            QueryOperator::In | QueryOperator::NotIn => {
                let negated = condition.operator == QueryOperator::NotIn;
                match &condition.value {
                    Some(Value::Array(array_values)) if !array_values.is_empty() => {
                        let placeholders: Vec<String> = array_values
                            .iter()
                            .map(|value| Self::next_param(value, values, param_counter))
                            .collect();
                        let keyword = if negated { "NOT IN" } else { "IN" };
                        format!("{} {} ({})", field, keyword, placeholders.join(", "))
                    }
                    // Empty IN matches nothing, empty NOT IN matches everything
                    _ if negated => "1=1".to_string(),
                    _ => "1=0".to_string(),
                }
            }
            QueryOperator::IsNull => format!("{} IS NULL", field),
            QueryOperator::IsNotNull => format!("{} IS NOT NULL", field),
        }
    }

    /// Build ORDER BY clause
    pub fn build_order_clause(order_by: &[(String, SortOrder)]) -> String {
        if order_by.is_empty() {
            return String::new();
        }

        let order_items: Vec<String> = order_by
            .iter()
            .map(|(field, order)| format!("{} {}", quote_identifier(field), order.to_sql()))
            .collect();

        format!("ORDER BY {}", order_items.join(", "))
    }

    /// Build LIMIT/OFFSET clause
    pub fn build_limit_clause(limit: Option<i64>, offset: Option<i64>) -> String {
        let mut clauses = Vec::new();

        if let Some(limit) = limit {
            clauses.push(format!("LIMIT {}", limit));
        }

        if let Some(offset) = offset {
            clauses.push(format!("OFFSET {}", offset));
        }

        clauses.join(" ")
    }
}
