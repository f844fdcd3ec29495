use serde_json::Value;

/// Ordered `column = value` assignments of an UPDATE.
///
/// Order is preserved so placeholders are numbered deterministically.
/// Setting a column twice replaces the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSet {
    pub(crate) assignments: Vec<(String, Value)>,
}

impl UpdateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field to a specific value
    pub fn set(mut self, field: impl Into<String>, value: Value) -> Self {
        self.insert(field.into(), value);
        self
    }

    pub fn insert(&mut self, field: String, value: Value) {
        match self.assignments.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.assignments.push((field, value)),
        }
    }

    /// Append every assignment of `other`, overriding shared columns
    pub fn merge(mut self, other: UpdateSet) -> Self {
        for (field, value) in other.assignments {
            self.insert(field, value);
        }
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.assignments
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Value)> {
        self.assignments.iter()
    }

    /// Check if there are any operations
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Get number of operations
    pub fn len(&self) -> usize {
        self.assignments.len()
    }
}
