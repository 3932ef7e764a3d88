//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and the ordered list that owns it.
//!
//! # Invariants
//! - Every task reaches the list through construction-time validation.
//! - The list is the only owner of task data; command code borrows it.

pub mod list;
pub mod task;
