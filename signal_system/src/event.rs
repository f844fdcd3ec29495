//! Delete event types and definitions
//!
//! This module defines the notifications that surround a single-record
//! soft delete.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Delete event type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    /// Dispatched before any side effect; guards may stop the delete
    BeforeDelete,
    /// Dispatched once the row has been marked
    AfterDelete,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::BeforeDelete => "Model.beforeDelete",
            EventType::AfterDelete => "Model.afterDelete",
        }
    }
}

/// Delete event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseEvent {
    /// Event type
    pub event_type: EventType,
    /// Table name
    pub table_name: String,
    /// Primary key rendered as text (composite keys joined with `,`)
    pub record_id: Option<String>,
    /// The record being deleted, as serialized by serde
    pub record: Value,
    /// Options of the delete call (`check_rules`, `actor`, ...)
    pub options: HashMap<String, Value>,
    /// Event timestamp (UTC)
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl DatabaseEvent {
    pub fn new(event_type: EventType, table_name: String) -> Self {
        Self {
            event_type,
            table_name,
            record_id: None,
            record: Value::Null,
            options: HashMap::new(),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn with_record_id(mut self, record_id: String) -> Self {
        self.record_id = Some(record_id);
        self
    }

    pub fn with_record(mut self, record: Value) -> Self {
        self.record = record;
        self
    }

    pub fn with_option(mut self, key: &str, value: Value) -> Self {
        self.options.insert(key.to_string(), value);
        self
    }

    pub fn add_option(&mut self, key: String, value: Value) {
        self.options.insert(key, value);
    }

    /// Read an option back, e.g. the `actor` the delete was issued for
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn is_before(&self) -> bool {
        self.event_type == EventType::BeforeDelete
    }
}
