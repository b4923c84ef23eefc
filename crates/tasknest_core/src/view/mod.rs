//! Presentation-ready projections over a task snapshot.
//!
//! # Responsibility
//! - Derive orderings, groupings and completion statistics for rendering.
//!
//! # Invariants
//! - Every projection is a pure function of its inputs; the snapshot is
//!   never mutated.

pub mod projection;
