//! Pure view projections: sorting, grouping, filtering and completion
//! statistics.
//!
//! # Invariants
//! - Same snapshot and arguments always produce the same result.
//! - Inputs are read-only; every projection returns new data.

use crate::model::task::Task;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Ordering criterion for [`sort_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCriterion {
    /// Descending priority rank (high, medium, low). Ties keep prior
    /// relative order.
    Priority,
    /// Ascending due date. Missing or unparseable dates sort first; this
    /// mirrors long-standing behavior that renderers rely on, so it is kept
    /// deliberately rather than treated as undefined.
    DueDate,
    /// Case-sensitive lexical compare on task text.
    Alphabetical,
}

/// Returns a newly ordered copy of the snapshot. Stable for equal keys.
pub fn sort_by(snapshot: &[Task], criterion: SortCriterion) -> Vec<Task> {
    let mut tasks = snapshot.to_vec();
    match criterion {
        SortCriterion::Priority => {
            tasks.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
        }
        SortCriterion::DueDate => {
            tasks.sort_by_key(|task| due_date_sort_key(task));
        }
        SortCriterion::Alphabetical => {
            tasks.sort_by(|a, b| a.text.cmp(&b.text));
        }
    }
    tasks
}

fn due_date_sort_key(task: &Task) -> NaiveDate {
    task.due_date
        .as_deref()
        .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .unwrap_or(NaiveDate::MIN)
}

/// One category partition produced by [`group_by_category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBucket {
    pub category: String,
    pub tasks: Vec<Task>,
}

/// Partitions the snapshot into per-category buckets.
///
/// Bucket order is first-seen order of each category in the snapshot; within
/// a bucket, tasks keep snapshot order.
pub fn group_by_category(snapshot: &[Task]) -> Vec<CategoryBucket> {
    let mut buckets: Vec<CategoryBucket> = Vec::new();

    for task in snapshot {
        match buckets
            .iter_mut()
            .find(|bucket| bucket.category == task.category)
        {
            Some(bucket) => bucket.tasks.push(task.clone()),
            None => buckets.push(CategoryBucket {
                category: task.category.clone(),
                tasks: vec![task.clone()],
            }),
        }
    }

    buckets
}

/// Percentage of completed tasks, rounded to the nearest integer.
///
/// Defined as 0 for an empty snapshot.
pub fn completion_rate(snapshot: &[Task]) -> u32 {
    if snapshot.is_empty() {
        return 0;
    }

    let completed = snapshot.iter().filter(|task| task.completed).count();
    let rate = 100.0 * completed as f64 / snapshot.len() as f64;
    rate.round() as u32
}

/// Completed-task counts per day, ascending by date.
///
/// Completed tasks bucket under `completed_date` when present, falling back
/// to `added_date`. Incomplete tasks are excluded entirely.
pub fn completion_histogram(snapshot: &[Task]) -> BTreeMap<NaiveDate, usize> {
    let mut histogram = BTreeMap::new();

    for task in snapshot.iter().filter(|task| task.completed) {
        let day = task.completed_date.unwrap_or(task.added_date);
        *histogram.entry(day).or_insert(0) += 1;
    }

    histogram
}

/// Case-insensitive substring filter on task text.
///
/// An empty query matches every task.
pub fn filter_by_text(snapshot: &[Task], query: &str) -> Vec<Task> {
    let needle = query.to_lowercase();
    snapshot
        .iter()
        .filter(|task| task.text.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
