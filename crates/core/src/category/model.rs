//! Category model definitions

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// A category grouping tasks, sequenced client-side by `category_order`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub category_order: i64,
    /// Tasks owned by this category; deleted along with it
    #[serde(default)]
    pub tasks: Vec<Task>,
}
