//! SQLite-backed task storage
//!
//! Same transaction discipline as the category store. Task update
//! re-validates its `category_id` itself; task creation relies on the
//! caller's parent pre-check, with the FK constraint as a backstop.

use rusqlite::{params, OptionalExtension};

use super::model::Task;
use crate::{Db, Error, Result};

/// Task store over the shared database handle
#[derive(Clone)]
pub struct TaskStore {
    db: Db,
}

impl TaskStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Get a task by ID. Returns `None` if unknown.
    pub fn get(&self, id: i64) -> Result<Option<Task>> {
        let conn = self.db.conn()?;
        let task = conn
            .query_row(
                "SELECT id, title, description, task_order, category_id
                 FROM tasks WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Task {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        description: row.get(2)?,
                        task_order: row.get(3)?,
                        category_id: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(task)
    }

    /// Create a task under `category_id`, returning it with its assigned ID.
    pub fn create(
        &self,
        title: &str,
        description: &str,
        task_order: i64,
        category_id: i64,
    ) -> Result<Task> {
        tracing::debug!(title, category_id, "creating task");
        let mut conn = self.db.conn()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO tasks (title, description, task_order, category_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![title, description, task_order, category_id],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Task {
            id,
            title: title.to_string(),
            description: description.to_string(),
            task_order,
            category_id,
        })
    }

    /// Overwrite a task's fields, moving it to `category_id` if that differs.
    ///
    /// Returns `None` for an unknown task. Fails with
    /// [`Error::CategoryNotFound`] when `category_id` does not exist, leaving
    /// the stored row untouched.
    pub fn update(
        &self,
        id: i64,
        title: &str,
        description: &str,
        task_order: i64,
        category_id: i64,
    ) -> Result<Option<Task>> {
        tracing::debug!(id, title, category_id, "updating task");
        let mut conn = self.db.conn()?;
        let tx = conn.transaction()?;

        let task_exists: Option<i64> = tx
            .query_row("SELECT id FROM tasks WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;
        if task_exists.is_none() {
            return Ok(None);
        }

        let category_exists: Option<i64> = tx
            .query_row(
                "SELECT id FROM categories WHERE id = ?1",
                params![category_id],
                |row| row.get(0),
            )
            .optional()?;
        if category_exists.is_none() {
            tracing::warn!(task_id = id, category_id, "task update references unknown category");
            return Err(Error::CategoryNotFound(category_id));
        }

        tx.execute(
            "UPDATE tasks SET title = ?1, description = ?2, task_order = ?3, category_id = ?4
             WHERE id = ?5",
            params![title, description, task_order, category_id, id],
        )?;
        tx.commit()?;

        Ok(Some(Task {
            id,
            title: title.to_string(),
            description: description.to_string(),
            task_order,
            category_id,
        }))
    }

    /// Delete a task, returning its owning category ID, or `None` if unknown.
    pub fn delete(&self, id: i64) -> Result<Option<i64>> {
        let mut conn = self.db.conn()?;
        let tx = conn.transaction()?;

        let category_id: Option<i64> = tx
            .query_row(
                "SELECT category_id FROM tasks WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        if category_id.is_none() {
            return Ok(None);
        }

        tx.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        tx.commit()?;

        tracing::info!(id, "deleted task");
        Ok(category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryStore;
    use tempfile::TempDir;

    fn create_test_store() -> (CategoryStore, TaskStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let db = Db::open(temp.path().join("todo.db")).unwrap();
        (CategoryStore::new(db.clone()), TaskStore::new(db), temp)
    }

    #[test]
    fn test_create_and_get_task() {
        let (categories, tasks, _temp) = create_test_store();

        let category = categories.create("Work", 1).unwrap();
        let created = tasks
            .create("Write spec", "Draft the v1 document", 1, category.id)
            .unwrap();

        let fetched = tasks.get(created.id).unwrap().unwrap();
        assert_eq!(fetched.title, "Write spec");
        assert_eq!(fetched.description, "Draft the v1 document");
        assert_eq!(fetched.task_order, 1);
        assert_eq!(fetched.category_id, category.id);
    }

    #[test]
    fn test_get_unknown_task() {
        let (_categories, tasks, _temp) = create_test_store();
        assert!(tasks.get(999999).unwrap().is_none());
    }

    #[test]
    fn test_update_task_moves_category() {
        let (categories, tasks, _temp) = create_test_store();

        let first = categories.create("Work", 1).unwrap();
        let second = categories.create("Home", 2).unwrap();
        let task = tasks.create("Errand", "", 1, first.id).unwrap();

        let updated = tasks
            .update(task.id, "Errand", "moved", 3, second.id)
            .unwrap()
            .unwrap();
        assert_eq!(updated.category_id, second.id);
        assert_eq!(updated.task_order, 3);

        let fetched = tasks.get(task.id).unwrap().unwrap();
        assert_eq!(fetched.category_id, second.id);
        assert_eq!(fetched.description, "moved");
    }

    #[test]
    fn test_update_task_unknown_category() {
        let (categories, tasks, _temp) = create_test_store();

        let category = categories.create("Work", 1).unwrap();
        let task = tasks.create("Write spec", "original", 1, category.id).unwrap();

        let result = tasks.update(task.id, "Changed", "changed", 9, 999999);
        match result {
            Err(Error::CategoryNotFound(id)) => assert_eq!(id, 999999),
            other => panic!("Expected CategoryNotFound error, got: {other:?}"),
        }

        // Stored fields are untouched
        let fetched = tasks.get(task.id).unwrap().unwrap();
        assert_eq!(fetched.title, "Write spec");
        assert_eq!(fetched.description, "original");
        assert_eq!(fetched.task_order, 1);
        assert_eq!(fetched.category_id, category.id);
    }

    #[test]
    fn test_update_unknown_task() {
        let (categories, tasks, _temp) = create_test_store();
        let category = categories.create("Work", 1).unwrap();
        let result = tasks.update(999999, "Nope", "", 1, category.id).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_delete_task_returns_category_id() {
        let (categories, tasks, _temp) = create_test_store();

        let category = categories.create("Work", 1).unwrap();
        let task = tasks.create("Write spec", "", 1, category.id).unwrap();

        let owner = tasks.delete(task.id).unwrap();
        assert_eq!(owner, Some(category.id));
        assert!(tasks.get(task.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_unknown_task() {
        let (_categories, tasks, _temp) = create_test_store();
        assert!(tasks.delete(999999).unwrap().is_none());
    }
}
