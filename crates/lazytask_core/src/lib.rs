//! Core command engine for LazyTask.
//!
//! Parses short textual commands, mutates the in-memory task list, and
//! persists it between runs. Front-ends stay thin: they feed raw text to
//! [`Session::process_command`] and print the returned response, so the
//! core is presentation-agnostic.

pub mod command;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;

pub use command::{apply, parse, Command, CommandError, Response};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::list::TaskList;
pub use model::task::{Task, TaskKind, TaskValidationError};
pub use service::session::Session;
pub use storage::{LineFileStore, StorageError, StorageResult, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
