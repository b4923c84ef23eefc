//! Remote authoritative backend adapter.
//!
//! # Responsibility
//! - Map the backend contract onto a per-user remote document API.
//! - Enforce the session requirement on every exchange.
//!
//! # Invariants
//! - Every exchange is independent, with its own success/failure outcome.
//! - No automatic retry: a failed exchange is surfaced to the caller as-is.
//! - Concurrent sessions resolve last-write-wins; the service layer's full
//!   snapshot reload after each mutation is idempotent and tolerates
//!   out-of-order completion.

use crate::model::task::{NewTask, Task, TaskId};
use crate::repo::session::{SessionProvider, UserId};
use crate::repo::task_repo::{PersistenceError, RepoError, RepoResult, TaskRepository};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable error code a remote implementation uses to report a missing
/// record on update. The repository maps it to [`RepoError::NotFound`].
pub const REMOTE_NOT_FOUND_CODE: &str = "not_found";

pub type RemoteResult<T> = Result<T, RemoteApiError>;

/// Typed failure envelope for one remote exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteApiError {
    /// Stable machine-readable code (for example `not_found`, `network`).
    pub code: String,
    /// Human-readable description for surfacing at the call site.
    pub message: String,
    /// Whether the caller may reasonably re-issue the exchange.
    pub retryable: bool,
}

impl RemoteApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            retryable,
        }
    }

    pub fn not_found(id: &TaskId) -> Self {
        Self::new(REMOTE_NOT_FOUND_CODE, format!("no record for {id}"), false)
    }
}

impl Display for RemoteApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "remote exchange failed ({}): {}", self.code, self.message)
    }
}

impl Error for RemoteApiError {}

/// Per-user document API exposed by the remote authoritative store.
///
/// Implementations own transport and credentials; credentials are sourced
/// from the implementor's own configuration and never pass through here.
/// Each method is one network exchange.
pub trait RemoteTaskApi {
    /// Stores a new record and returns it with its server-assigned
    /// identifier.
    fn add_record(&self, user: &UserId, new_task: NewTask) -> RemoteResult<Task>;

    /// Returns all records stored for the user.
    fn records_for_user(&self, user: &UserId) -> RemoteResult<Vec<Task>>;

    /// Replaces the record matching `task.identifier`.
    ///
    /// Reports [`REMOTE_NOT_FOUND_CODE`] when the record does not exist.
    fn update_record(&self, user: &UserId, task: &Task) -> RemoteResult<()>;

    /// Deletes one record. Deleting an absent record succeeds.
    fn delete_record(&self, user: &UserId, id: &TaskId) -> RemoteResult<()>;
}

impl<T: RemoteTaskApi + ?Sized> RemoteTaskApi for std::sync::Arc<T> {
    fn add_record(&self, user: &UserId, new_task: NewTask) -> RemoteResult<Task> {
        (**self).add_record(user, new_task)
    }

    fn records_for_user(&self, user: &UserId) -> RemoteResult<Vec<Task>> {
        (**self).records_for_user(user)
    }

    fn update_record(&self, user: &UserId, task: &Task) -> RemoteResult<()> {
        (**self).update_record(user, task)
    }

    fn delete_record(&self, user: &UserId, id: &TaskId) -> RemoteResult<()> {
        (**self).delete_record(user, id)
    }
}

/// Session-scoped repository over a remote document API.
pub struct RemoteRepository<A: RemoteTaskApi, S: SessionProvider> {
    api: A,
    session: S,
}

impl<A: RemoteTaskApi, S: SessionProvider> RemoteRepository<A, S> {
    pub fn new(api: A, session: S) -> Self {
        Self { api, session }
    }

    fn require_user(&self) -> RepoResult<UserId> {
        self.session
            .current_user()
            .ok_or(RepoError::Unauthenticated)
    }
}

impl<A: RemoteTaskApi, S: SessionProvider> TaskRepository for RemoteRepository<A, S> {
    fn create_task(&self, new_task: NewTask) -> RepoResult<Task> {
        let user = self.require_user()?;
        self.api
            .add_record(&user, new_task)
            .map_err(remote_to_repo_error)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        let user = self.require_user()?;
        self.api.update_record(&user, task).map_err(|err| {
            if err.code == REMOTE_NOT_FOUND_CODE {
                RepoError::NotFound(task.identifier.clone())
            } else {
                remote_to_repo_error(err)
            }
        })
    }

    fn delete_task(&self, id: &TaskId) -> RepoResult<()> {
        let user = self.require_user()?;
        match self.api.delete_record(&user, id) {
            Ok(()) => Ok(()),
            // Idempotent delete: a record that is already gone is success.
            Err(err) if err.code == REMOTE_NOT_FOUND_CODE => Ok(()),
            Err(err) => Err(remote_to_repo_error(err)),
        }
    }

    fn load_tasks(&self) -> RepoResult<Vec<Task>> {
        let user = self.require_user()?;
        self.api
            .records_for_user(&user)
            .map_err(remote_to_repo_error)
    }

    fn clear_tasks(&self) -> RepoResult<()> {
        // The remote interface has no bulk delete; clearing composes
        // get-all with per-record deletes.
        let user = self.require_user()?;
        let records = self
            .api
            .records_for_user(&user)
            .map_err(remote_to_repo_error)?;

        for record in records {
            match self.api.delete_record(&user, &record.identifier) {
                Ok(()) => {}
                Err(err) if err.code == REMOTE_NOT_FOUND_CODE => {}
                Err(err) => return Err(remote_to_repo_error(err)),
            }
        }

        Ok(())
    }
}

fn remote_to_repo_error(err: RemoteApiError) -> RepoError {
    RepoError::Persistence(PersistenceError::Remote(err))
}
