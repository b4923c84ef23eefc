//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate backend calls into task-store level APIs.
//! - Keep callers decoupled from which backend variant is active.

pub mod task_service;
