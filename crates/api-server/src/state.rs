//! Application state

use std::path::Path;
use std::sync::Arc;

use todo_core::category::CategoryStore;
use todo_core::task::TaskStore;
use todo_core::Db;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    category_store: CategoryStore,
    task_store: TaskStore,
}

impl AppState {
    /// Open the database at `db_path` and wire up the stores.
    pub fn new(db_path: impl AsRef<Path>) -> todo_core::Result<Self> {
        let db = Db::open(db_path)?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                category_store: CategoryStore::new(db.clone()),
                task_store: TaskStore::new(db),
            }),
        })
    }

    /// Get reference to the category store
    pub fn categories(&self) -> &CategoryStore {
        &self.inner.category_store
    }

    /// Get reference to the task store
    pub fn tasks(&self) -> &TaskStore {
        &self.inner.task_store
    }
}
