//! Session orchestration.
//!
//! # Responsibility
//! - Wire parse, apply, and persist into one command cycle.
//! - Keep front-ends decoupled from command and storage details.

pub mod session;
