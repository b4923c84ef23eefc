//! Core task persistence and synchronization logic for tasknest.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{NewTask, Priority, Task, TaskDraft, TaskId, TaskValidationError};
pub use repo::local_repo::{LocalCacheRepository, TASKS_CACHE_KEY};
pub use repo::remote_repo::{
    RemoteApiError, RemoteRepository, RemoteResult, RemoteTaskApi, REMOTE_NOT_FOUND_CODE,
};
pub use repo::session::{SessionProvider, SessionState, UserId};
pub use repo::task_repo::{PersistenceError, RepoError, RepoResult, TaskRepository};
pub use service::task_service::TaskService;
pub use view::projection::{
    completion_histogram, completion_rate, filter_by_text, group_by_category, sort_by,
    CategoryBucket, SortCriterion,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
