//! SQLite-backed category storage
//!
//! Each operation checks one connection out of the pool; mutations run
//! inside an explicit transaction (dropping it rolls back, commit is the
//! last step before returning).

use rusqlite::{params, Connection, OptionalExtension};

use super::model::Category;
use crate::task::Task;
use crate::{Db, Result};

/// Category store over the shared database handle
#[derive(Clone)]
pub struct CategoryStore {
    db: Db,
}

impl CategoryStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// List up to `limit` categories starting at `skip`, tasks nested.
    ///
    /// Rows come back in storage order; display sequencing by
    /// `category_order` is the client's job.
    pub fn list(&self, skip: u32, limit: u32) -> Result<Vec<Category>> {
        tracing::debug!(skip, limit, "listing categories");
        let conn = self.db.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, category_order FROM categories LIMIT ?1 OFFSET ?2")?;
        let rows = stmt.query_map(params![limit, skip], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?;

        let mut categories = Vec::new();
        for row in rows {
            let (id, name, category_order): (i64, String, i64) = row?;
            categories.push(Category {
                id,
                name,
                category_order,
                tasks: tasks_for_category(&conn, id)?,
            });
        }
        Ok(categories)
    }

    /// Get a category by ID, tasks nested. Returns `None` if unknown.
    pub fn get(&self, id: i64) -> Result<Option<Category>> {
        let conn = self.db.conn()?;
        get_category(&conn, id)
    }

    /// Create a category, returning it with its assigned ID.
    pub fn create(&self, name: &str, category_order: i64) -> Result<Category> {
        tracing::debug!(name, category_order, "creating category");
        let mut conn = self.db.conn()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO categories (name, category_order) VALUES (?1, ?2)",
            params![name, category_order],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Category {
            id,
            name: name.to_string(),
            category_order,
            tasks: Vec::new(),
        })
    }

    /// Overwrite a category's fields. Returns `None` if unknown.
    pub fn update(&self, id: i64, name: &str, category_order: i64) -> Result<Option<Category>> {
        tracing::debug!(id, name, category_order, "updating category");
        let mut conn = self.db.conn()?;
        let tx = conn.transaction()?;
        let changed = tx.execute(
            "UPDATE categories SET name = ?1, category_order = ?2 WHERE id = ?3",
            params![name, category_order, id],
        )?;
        tx.commit()?;

        if changed == 0 {
            return Ok(None);
        }
        get_category(&conn, id)
    }

    /// Delete a category and, via the FK cascade, all of its tasks.
    /// Returns `false` if the category was unknown.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let mut conn = self.db.conn()?;
        let tx = conn.transaction()?;
        let deleted = tx.execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        tx.commit()?;

        if deleted > 0 {
            tracing::info!(id, "deleted category and cascaded its tasks");
        }
        Ok(deleted > 0)
    }
}

fn get_category(conn: &Connection, id: i64) -> Result<Option<Category>> {
    let header: Option<(i64, String, i64)> = conn
        .query_row(
            "SELECT id, name, category_order FROM categories WHERE id = ?1",
            params![id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()?;

    match header {
        Some((id, name, category_order)) => Ok(Some(Category {
            id,
            name,
            category_order,
            tasks: tasks_for_category(conn, id)?,
        })),
        None => Ok(None),
    }
}

fn tasks_for_category(conn: &Connection, category_id: i64) -> Result<Vec<Task>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, description, task_order, category_id
         FROM tasks WHERE category_id = ?1",
    )?;
    let rows = stmt.query_map(params![category_id], |row| {
        Ok(Task {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            task_order: row.get(3)?,
            category_id: row.get(4)?,
        })
    })?;

    let mut tasks = Vec::new();
    for task in rows {
        tasks.push(task?);
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStore;
    use tempfile::TempDir;

    fn create_test_store() -> (CategoryStore, TaskStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let db = Db::open(temp.path().join("todo.db")).unwrap();
        (CategoryStore::new(db.clone()), TaskStore::new(db), temp)
    }

    #[test]
    fn test_create_and_get_category() {
        let (categories, _tasks, _temp) = create_test_store();

        let created = categories.create("Work", 1).unwrap();
        let fetched = categories.get(created.id).unwrap().unwrap();

        assert_eq!(fetched.name, "Work");
        assert_eq!(fetched.category_order, 1);
        assert!(fetched.tasks.is_empty());
    }

    #[test]
    fn test_get_unknown_category() {
        let (categories, _tasks, _temp) = create_test_store();
        assert!(categories.get(999999).unwrap().is_none());
    }

    #[test]
    fn test_list_pagination() {
        let (categories, _tasks, _temp) = create_test_store();

        for i in 0..15 {
            categories.create(&format!("Category {i}"), i).unwrap();
        }

        let first_page = categories.list(0, 10).unwrap();
        assert_eq!(first_page.len(), 10);

        let second_page = categories.list(10, 10).unwrap();
        assert_eq!(second_page.len(), 5);
    }

    #[test]
    fn test_list_nests_tasks() {
        let (categories, tasks, _temp) = create_test_store();

        let category = categories.create("Work", 1).unwrap();
        tasks.create("Write spec", "", 1, category.id).unwrap();
        tasks.create("Review spec", "", 2, category.id).unwrap();

        let listed = categories.list(0, 10).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].tasks.len(), 2);
    }

    #[test]
    fn test_update_category() {
        let (categories, _tasks, _temp) = create_test_store();

        let created = categories.create("Work", 1).unwrap();
        let updated = categories.update(created.id, "Home", 5).unwrap().unwrap();
        assert_eq!(updated.name, "Home");
        assert_eq!(updated.category_order, 5);

        let fetched = categories.get(created.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Home");
        assert_eq!(fetched.category_order, 5);
    }

    #[test]
    fn test_update_unknown_category() {
        let (categories, _tasks, _temp) = create_test_store();
        assert!(categories.update(999999, "Nope", 0).unwrap().is_none());
    }

    #[test]
    fn test_delete_category_cascades_tasks() {
        let (categories, tasks, _temp) = create_test_store();

        let category = categories.create("Work", 1).unwrap();
        let task_ids: Vec<i64> = (0..3)
            .map(|i| {
                tasks
                    .create(&format!("Task {i}"), "", i, category.id)
                    .unwrap()
                    .id
            })
            .collect();

        assert!(categories.delete(category.id).unwrap());

        assert!(categories.get(category.id).unwrap().is_none());
        for id in task_ids {
            assert!(tasks.get(id).unwrap().is_none());
        }
    }

    #[test]
    fn test_delete_unknown_category() {
        let (categories, _tasks, _temp) = create_test_store();
        assert!(!categories.delete(999999).unwrap());
    }
}
