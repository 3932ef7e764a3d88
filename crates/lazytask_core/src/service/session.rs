//! Single-user command session.
//!
//! # Responsibility
//! - Own the task list and its backing store for the process lifetime.
//! - Convert every command-level error into user-visible response text.
//!
//! # Invariants
//! - The list is persisted after every successfully applied command,
//!   including non-mutating ones.
//! - A save failure is reported but never rolls back the in-memory list.

use crate::command::{apply, parse, Response};
use crate::model::list::TaskList;
use crate::storage::TaskStore;
use log::{info, warn};

/// Owns the task list and drives the parse, apply, persist cycle.
///
/// One command is fully processed before the next is accepted; front-ends
/// feed raw text to [`Session::process_command`] and print the response.
pub struct Session<S: TaskStore> {
    store: S,
    list: TaskList,
}

impl<S: TaskStore> Session<S> {
    /// Loads persisted tasks and builds a session around them.
    ///
    /// A load failure falls back to an empty list; the returned notice text
    /// is meant for the front-end to show once at startup.
    pub fn start(store: S) -> (Self, Option<String>) {
        match store.load() {
            Ok(list) => {
                info!(
                    "event=session_start module=service status=ok tasks={}",
                    list.len()
                );
                (Self { store, list }, None)
            }
            Err(err) => {
                warn!("event=session_start module=service status=fallback error={err}");
                let notice = format!(
                    "Could not load saved tasks ({err}); starting with an empty list."
                );
                (
                    Self {
                        store,
                        list: TaskList::new(),
                    },
                    Some(notice),
                )
            }
        }
    }

    /// Current in-memory task list.
    pub fn tasks(&self) -> &TaskList {
        &self.list
    }

    /// Parses, applies, and persists one command.
    ///
    /// Never fails: every error becomes the response text. A save failure
    /// is appended to the response while the in-memory mutation is kept;
    /// the next successful save restores on-disk consistency.
    pub fn process_command(&mut self, input: &str) -> Response {
        let command = match parse(input, &self.list) {
            Ok(command) => command,
            Err(err) => {
                return Response {
                    text: err.to_string(),
                    exit: false,
                }
            }
        };

        let mut response = match apply(command, &mut self.list) {
            Ok(response) => response,
            Err(err) => {
                return Response {
                    text: err.to_string(),
                    exit: false,
                }
            }
        };

        if let Err(err) = self.store.save(&self.list) {
            warn!("event=session_save module=service status=error error={err}");
            response
                .text
                .push_str(&format!("\nWarning: your tasks could not be saved ({err})."));
        }

        response
    }
}
