//! Typed employee records.

use std::collections::BTreeMap;

use serde::Serialize;

/// One roster row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    /// Unique, non-empty identifier.
    pub id: String,
    /// Manager identifier; `None` marks the root.
    pub manager_id: Option<String>,
    /// Salary, zero when the column was absent or not numeric.
    pub salary: f64,
    /// Every other column, keyed by trimmed header. Never inspected by the engine.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl EmployeeRecord {
    pub fn new(id: impl Into<String>, manager_id: Option<&str>, salary: f64) -> Self {
        Self {
            id: id.into(),
            manager_id: manager_id.map(str::to_string),
            salary,
            attributes: BTreeMap::new(),
        }
    }

    /// Adds a passthrough attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn is_root(&self) -> bool {
        self.manager_id.is_none()
    }
}
