//! Backend contract and persistence implementations for the task store.
//!
//! # Responsibility
//! - Define the polymorphic backend contract (`TaskRepository`).
//! - Isolate cache SQL and remote exchange details from the service layer.
//!
//! # Invariants
//! - Backends assign task identifiers at creation; callers never choose them.
//! - Backend APIs return semantic errors (`NotFound`, `Unauthenticated`) in
//!   addition to transport errors.

pub mod local_repo;
pub mod remote_repo;
pub mod session;
pub mod task_repo;
