//! Local cache backend over the SQLite key-value table.
//!
//! # Responsibility
//! - Persist the whole task collection as one serialized JSON array under a
//!   fixed cache key.
//! - Keep write paths atomic: serialize first, then replace the row in a
//!   single statement.
//!
//! # Invariants
//! - `"tasks"` is the only cache key this repository touches.
//! - A malformed stored value is read as an empty collection (fail-open),
//!   never surfaced as an error.
//! - A serialization fault aborts the write and leaves prior state intact.

use crate::model::task::{NewTask, Task, TaskId};
use crate::repo::task_repo::{PersistenceError, RepoError, RepoResult, TaskRepository};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};

/// Fixed cache key holding the serialized task array.
pub const TASKS_CACHE_KEY: &str = "tasks";

/// SQLite-backed local cache repository.
///
/// Every operation loads the entire collection, mutates it in memory, and
/// rewrites the entire serialized collection. There is exactly one writer
/// (the caller's single thread of control), so no locking is needed.
pub struct LocalCacheRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> LocalCacheRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn read_collection(&self) -> RepoResult<Vec<Task>> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_cache WHERE key = ?1;",
                [TASKS_CACHE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let Some(raw) = stored else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(tasks) => Ok(tasks),
            Err(err) => {
                // Fail-open: a corrupted cache value must not take the whole
                // application down. The next successful write replaces it.
                warn!(
                    "event=cache_read module=repo status=fail_open key={TASKS_CACHE_KEY} error={err}"
                );
                Ok(Vec::new())
            }
        }
    }

    fn write_collection(&self, tasks: &[Task]) -> RepoResult<()> {
        let serialized =
            serde_json::to_string(tasks).map_err(PersistenceError::Serialization)?;

        self.conn.execute(
            "INSERT INTO kv_cache (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![TASKS_CACHE_KEY, serialized],
        )?;

        Ok(())
    }
}

impl TaskRepository for LocalCacheRepository<'_> {
    fn create_task(&self, new_task: NewTask) -> RepoResult<Task> {
        let task = Task::from_new(TaskId::generate(), new_task);

        let mut tasks = self.read_collection()?;
        tasks.push(task.clone());
        self.write_collection(&tasks)?;

        Ok(task)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        let mut tasks = self.read_collection()?;
        let Some(slot) = tasks
            .iter_mut()
            .find(|stored| stored.identifier == task.identifier)
        else {
            return Err(RepoError::NotFound(task.identifier.clone()));
        };

        *slot = task.clone();
        self.write_collection(&tasks)
    }

    fn delete_task(&self, id: &TaskId) -> RepoResult<()> {
        let mut tasks = self.read_collection()?;
        tasks.retain(|stored| &stored.identifier != id);
        self.write_collection(&tasks)
    }

    fn load_tasks(&self) -> RepoResult<Vec<Task>> {
        self.read_collection()
    }

    fn clear_tasks(&self) -> RepoResult<()> {
        self.write_collection(&[])
    }
}
