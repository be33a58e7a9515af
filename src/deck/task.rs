//! Task: a unit of product work referenced by cards

use serde::Serialize;
use std::collections::BTreeMap;

/// A row from the tasks table.
///
/// Only `task_id` and `product` are structural; everything else the table
/// carries (title, owner, quarter, ...) lands in `extra` untouched. Tasks
/// are immutable once loaded and owned by the external data source.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Task {
    /// Unique task identifier
    pub task_id: String,
    /// Product owning this task
    pub product: String,
    /// All remaining columns, keyed by header name
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Task {
    /// Create a task with the two structural fields.
    pub fn new(task_id: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            product: product.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Attach a descriptive column.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
