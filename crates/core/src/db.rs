//! SQLite database handle and schema migrations
//!
//! Wraps an r2d2 connection pool. Every pooled connection enables
//! `foreign_keys` so the categories -> tasks cascade applies on every path.

use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::{Error, Result};

/// Ordered schema migrations. `PRAGMA user_version` records how many have
/// been applied; new entries are appended, never edited.
const MIGRATIONS: &[&str] = &[
    // 1: initial categories/tasks pair with cascade delete
    "CREATE TABLE categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        category_order INTEGER
    );
    CREATE TABLE tasks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        task_order INTEGER NOT NULL,
        category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE
    );
    CREATE INDEX idx_tasks_category_id ON tasks(category_id);",
    // 2: tighten category_order to NOT NULL. SQLite cannot alter a column
    // constraint in place, so the table is rebuilt.
    "ALTER TABLE categories RENAME TO categories_old;
    CREATE TABLE categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        category_order INTEGER NOT NULL
    );
    INSERT INTO categories (id, name, category_order)
        SELECT id, name, COALESCE(category_order, 0) FROM categories_old;
    DROP TABLE categories_old;",
];

/// Shared database handle, cheap to clone
#[derive(Clone)]
pub struct Db {
    pool: Pool<SqliteConnectionManager>,
}

/// A connection checked out of the pool
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

impl Db {
    /// Open (or create) the database at `path` and apply pending migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path.as_ref())
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        let pool = Pool::new(manager)?;
        let db = Self { pool };
        let conn = db.conn()?;
        run_migrations(&conn)?;
        Ok(db)
    }

    /// Check a connection out of the pool.
    pub fn conn(&self) -> Result<PooledConnection> {
        Ok(self.pool.get()?)
    }
}

/// Apply every migration past the recorded `user_version`.
///
/// Foreign-key enforcement is suspended for the duration: migration 2
/// rebuilds the categories table via RENAME, and with `foreign_keys` on the
/// rename would rewrite the tasks FK to point at the old table name.
fn run_migrations(conn: &Connection) -> Result<()> {
    let applied: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    let applied = usize::try_from(applied).unwrap_or(0);
    if applied >= MIGRATIONS.len() {
        return Ok(());
    }

    conn.execute_batch("PRAGMA foreign_keys = OFF;")?;
    for (index, migration) in MIGRATIONS.iter().enumerate().skip(applied) {
        let version = index + 1;
        tracing::info!(version, "applying schema migration");
        conn.execute_batch(&format!(
            "BEGIN;\n{migration}\nPRAGMA user_version = {version};\nCOMMIT;"
        ))
        .map_err(|e| Error::Migration(format!("migration {version} failed: {e}")))?;
    }
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(())
}
