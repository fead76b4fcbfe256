//! Task model definitions

use serde::{Deserialize, Serialize};

/// A task belonging to exactly one category
///
/// `task_order` is an opaque display-sequence integer maintained by the
/// client; the storage layer never renumbers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub task_order: i64,
    pub category_id: i64,
}
