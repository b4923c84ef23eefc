//! Task store service: the single source of truth for the task collection.
//!
//! # Responsibility
//! - Validate user intents before they reach a backend.
//! - Stamp creation and completion dates.
//! - Keep the in-memory snapshot refreshed read-after-write.
//!
//! # Invariants
//! - Every successful mutation is followed by a full snapshot reload; the
//!   reload is idempotent and always reflects the latest persisted state.
//! - `completed` and `completed_date` never drift apart across transitions.
//! - A validation failure leaves both snapshot and store unchanged.

use crate::model::task::{validate_text, Task, TaskDraft, TaskId};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use chrono::{Local, NaiveDate};
use log::debug;

/// Task store over a chosen backend variant.
///
/// Owns the ordered snapshot of the collection; projection code reads the
/// snapshot and never mutates it.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    snapshot: Vec<Task>,
    completion_history_changed: bool,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service and loads the initial snapshot from the backend.
    pub fn new(repo: R) -> RepoResult<Self> {
        let snapshot = repo.load_tasks()?;
        Ok(Self {
            repo,
            snapshot,
            completion_history_changed: false,
        })
    }

    /// Creates a task from user input.
    ///
    /// # Contract
    /// - Rejects empty/whitespace-only text with a validation error before
    ///   any backend call.
    /// - Stamps `added_date` with the current date.
    /// - Returns the stored task including its backend-assigned identifier.
    pub fn create(&mut self, draft: TaskDraft) -> RepoResult<Task> {
        let new_task = draft.into_new_task(today())?;
        let task = self.repo.create_task(new_task)?;
        self.refresh()?;

        debug!(
            "event=task_create module=service status=ok id={}",
            task.identifier
        );
        Ok(task)
    }

    /// Sets a task's completion state and its completion-date bookkeeping.
    ///
    /// Completing stamps `completed_date` with the current date; un-completing
    /// clears it. Signals "completion history changed" for chart consumers.
    pub fn set_completed(&mut self, id: &TaskId, completed: bool) -> RepoResult<Task> {
        let mut task = self.find(id)?.clone();
        task.set_completed(completed, today());

        self.repo.update_task(&task)?;
        self.completion_history_changed = true;
        self.refresh()?;
        Ok(task)
    }

    /// Replaces a task's text in place.
    pub fn edit_text(&mut self, id: &TaskId, new_text: &str) -> RepoResult<Task> {
        validate_text(new_text)?;

        let mut task = self.find(id)?.clone();
        task.text = new_text.to_string();

        self.repo.update_task(&task)?;
        self.refresh()?;
        Ok(task)
    }

    /// Deletes a task. Deleting an absent identifier is a successful no-op.
    pub fn delete(&mut self, id: &TaskId) -> RepoResult<()> {
        self.repo.delete_task(id)?;
        self.refresh()
    }

    /// Returns the current ordered snapshot. No side effects.
    pub fn list(&self) -> &[Task] {
        &self.snapshot
    }

    /// Empties the collection and persists the empty collection.
    pub fn clear_all(&mut self) -> RepoResult<()> {
        self.repo.clear_tasks()?;
        self.refresh()
    }

    /// Reloads the snapshot from the backend.
    ///
    /// Safe to call at any time; callers racing overlapping remote exchanges
    /// re-run this to converge on the latest persisted state.
    pub fn refresh(&mut self) -> RepoResult<()> {
        self.snapshot = self.repo.load_tasks()?;
        Ok(())
    }

    /// Returns and clears the "completion history changed" signal.
    ///
    /// Chart consumers poll this after dispatching intents to decide whether
    /// the completion histogram needs recomputing.
    pub fn take_completion_history_changed(&mut self) -> bool {
        std::mem::take(&mut self.completion_history_changed)
    }

    fn find(&self, id: &TaskId) -> RepoResult<&Task> {
        self.snapshot
            .iter()
            .find(|task| &task.identifier == id)
            .ok_or_else(|| RepoError::NotFound(id.clone()))
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
