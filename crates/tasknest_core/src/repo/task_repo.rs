//! Task backend contract and shared error taxonomy.
//!
//! # Responsibility
//! - Define the operations every persistence backend must provide.
//! - Give the service layer one error surface across local and remote
//!   variants.
//!
//! # Invariants
//! - `delete_task` is idempotent: deleting an absent identifier is a
//!   successful no-op, not an error.
//! - `create_task` returns the stored record including its assigned
//!   identifier.

use crate::db::DbError;
use crate::model::task::{NewTask, Task, TaskId, TaskValidationError};
use crate::repo::remote_repo::RemoteApiError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Backend error for task persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// A required field failed validation.
    Validation(TaskValidationError),
    /// The operation targeted an identifier the store does not hold.
    NotFound(TaskId),
    /// A remote operation was issued with no active session.
    Unauthenticated,
    /// The underlying store read or write failed.
    Persistence(PersistenceError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Unauthenticated => write!(f, "no active session for remote task store"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::Unauthenticated => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PersistenceError> for RepoError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Persistence(PersistenceError::Db(value))
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Persistence(PersistenceError::Db(DbError::Sqlite(value)))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Persistence(PersistenceError::Serialization(value))
    }
}

/// Transport-level failure behind [`RepoError::Persistence`].
#[derive(Debug)]
pub enum PersistenceError {
    /// Cache database read/write failed.
    Db(DbError),
    /// Task collection could not be serialized.
    Serialization(serde_json::Error),
    /// A remote exchange failed.
    Remote(RemoteApiError),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "task serialization failed: {err}"),
            Self::Remote(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::Remote(err) => Some(err),
        }
    }
}

/// Backend contract for the task store.
///
/// Two interchangeable variants exist: the synchronous local cache
/// (whole-collection read/rewrite) and the session-scoped remote store
/// (per-record exchanges). The service layer refreshes its snapshot with
/// `load_tasks` after every mutation, so backends never need incremental
/// change feedback beyond the operation result itself.
pub trait TaskRepository {
    /// Stores a new task and returns it with its assigned identifier.
    fn create_task(&self, new_task: NewTask) -> RepoResult<Task>;

    /// Replaces the stored record matching `task.identifier`.
    fn update_task(&self, task: &Task) -> RepoResult<()>;

    /// Removes a task. Absent identifiers are a successful no-op.
    fn delete_task(&self, id: &TaskId) -> RepoResult<()>;

    /// Returns the full stored collection in insertion order.
    fn load_tasks(&self) -> RepoResult<Vec<Task>>;

    /// Empties the stored collection. Irreversible.
    fn clear_tasks(&self) -> RepoResult<()>;
}
