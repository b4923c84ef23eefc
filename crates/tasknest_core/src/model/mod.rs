//! Domain model for the task collection.
//!
//! # Responsibility
//! - Define the canonical task record shared by every backend.
//! - Keep validation rules next to the data they protect.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`, assigned at creation.
//! - `completed` and `completed_date` transition together; one never drifts
//!   from the other.

pub mod task;
