//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record persisted by every backend.
//! - Provide lifecycle helpers for completion bookkeeping.
//!
//! # Invariants
//! - `identifier` is stable and never reused for another task.
//! - `completed_date` is present exactly when `completed` is true.
//! - `added_date` is set once at creation and never changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Locally created tasks carry a generated UUID; the remote store assigns
/// its own opaque document key. Both are kept as strings so one identifier
/// type covers both backends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wraps an identifier already assigned by a store.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh random identifier for local creation paths.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task urgency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Numeric rank used by priority ordering: high=3, medium=2, low=1.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

/// Canonical to-do record.
///
/// Serialized field names match the cache format written by earlier versions
/// of the application, so an existing `"tasks"` payload keeps loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable key used for lookup, update and delete across backends.
    pub identifier: TaskId,
    /// Display text. Non-empty by construction.
    pub text: String,
    /// Free-form user-chosen label.
    pub category: String,
    /// Optional calendar date, kept exactly as entered. May be unparseable;
    /// the due-date sort treats such values as earliest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    /// Calendar date of creation. Immutable.
    pub added_date: NaiveDate,
    /// Present exactly while `completed` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
}

impl Task {
    /// Materializes a stored task from an identifier-less draft record.
    pub fn from_new(identifier: TaskId, new_task: NewTask) -> Self {
        Self {
            identifier,
            text: new_task.text,
            category: new_task.category,
            due_date: new_task.due_date,
            priority: new_task.priority,
            completed: false,
            added_date: new_task.added_date,
            completed_date: None,
        }
    }

    /// Applies a completion transition, keeping the date invariant.
    ///
    /// Sets `completed_date` to `on_date` when completing; clears it when
    /// un-completing.
    pub fn set_completed(&mut self, completed: bool, on_date: NaiveDate) {
        self.completed = completed;
        self.completed_date = completed.then_some(on_date);
    }

    /// Returns whether the completion invariant currently holds.
    pub fn completion_invariant_holds(&self) -> bool {
        self.completed == self.completed_date.is_some()
    }
}

/// Identifier-less record handed to a backend's create operation.
///
/// The backend assigns the identifier: a generated UUID locally, a
/// server-assigned key remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub text: String,
    pub category: String,
    pub due_date: Option<String>,
    pub priority: Priority,
    pub added_date: NaiveDate,
}

/// User-supplied input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub text: String,
    pub category: String,
    pub due_date: Option<String>,
    pub priority: Priority,
}

impl TaskDraft {
    /// Creates a draft with an empty category and no due date.
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Self {
            text: text.into(),
            category: String::new(),
            due_date: None,
            priority,
        }
    }

    /// Validates the draft and stamps it with its creation date.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyText` when `text` is empty or whitespace.
    pub fn into_new_task(self, added_date: NaiveDate) -> Result<NewTask, TaskValidationError> {
        validate_text(&self.text)?;
        Ok(NewTask {
            text: self.text,
            category: self.category,
            due_date: self.due_date,
            priority: self.priority,
            added_date,
        })
    }
}

/// Rejects empty or whitespace-only task text.
pub fn validate_text(text: &str) -> Result<(), TaskValidationError> {
    if text.trim().is_empty() {
        return Err(TaskValidationError::EmptyText);
    }
    Ok(())
}

/// Validation failure for task input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyText,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

#[cfg(test)]
mod tests {
    use super::{validate_text, Priority, Task, TaskDraft, TaskId, TaskValidationError};
    use chrono::NaiveDate;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn draft_validation_rejects_blank_text() {
        assert_eq!(validate_text(""), Err(TaskValidationError::EmptyText));
        assert_eq!(validate_text("   "), Err(TaskValidationError::EmptyText));
        assert!(validate_text("read chapter 4").is_ok());
    }

    #[test]
    fn new_task_starts_incomplete_with_added_date() {
        let draft = TaskDraft::new("read chapter 4", Priority::Medium);
        let new_task = draft.into_new_task(date("2024-12-01")).unwrap();
        let task = Task::from_new(TaskId::generate(), new_task);

        assert!(!task.completed);
        assert!(task.completed_date.is_none());
        assert_eq!(task.added_date, date("2024-12-01"));
        assert!(task.completion_invariant_holds());
    }

    #[test]
    fn completion_transitions_keep_date_invariant() {
        let draft = TaskDraft::new("submit report", Priority::High);
        let new_task = draft.into_new_task(date("2024-12-01")).unwrap();
        let mut task = Task::from_new(TaskId::generate(), new_task);

        task.set_completed(true, date("2024-12-03"));
        assert_eq!(task.completed_date, Some(date("2024-12-03")));
        assert!(task.completion_invariant_holds());

        task.set_completed(false, date("2024-12-04"));
        assert!(task.completed_date.is_none());
        assert!(task.completion_invariant_holds());
    }

    #[test]
    fn serialized_field_names_match_cache_format() {
        let draft = TaskDraft::new("water plants", Priority::Low);
        let new_task = draft.into_new_task(date("2024-12-01")).unwrap();
        let mut task = Task::from_new(TaskId::new("abc-123"), new_task);
        task.set_completed(true, date("2024-12-02"));

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["identifier"], "abc-123");
        assert_eq!(json["priority"], "low");
        assert_eq!(json["addedDate"], "2024-12-01");
        assert_eq!(json["completedDate"], "2024-12-02");
    }

    #[test]
    fn completed_date_is_omitted_while_incomplete() {
        let draft = TaskDraft::new("water plants", Priority::Low);
        let new_task = draft.into_new_task(date("2024-12-01")).unwrap();
        let task = Task::from_new(TaskId::generate(), new_task);

        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("completedDate").is_none());
    }
}
