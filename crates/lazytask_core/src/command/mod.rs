//! Command parsing and execution.
//!
//! # Responsibility
//! - Turn raw input text into a typed, fully validated command value.
//! - Apply validated commands against the task list and render responses.
//!
//! # Invariants
//! - Parsing never mutates the task list.
//! - A command that fails validation leaves the list unchanged.
//! - `Response::exit` is true only for the terminating command.

use crate::model::task::{Task, TaskValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod apply;
pub mod parse;

pub use apply::apply;
pub use parse::parse;

/// One parsed, executable user request.
///
/// Index-carrying variants hold 0-based indices; the 1-based user surface
/// is converted during parsing and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append a validated task (plain, deadline, or event).
    Add(Task),
    /// Enumerate every task with its completion state.
    List,
    /// Set the done flag on one task.
    Mark { index: usize },
    /// Clear the done flag on one task.
    Unmark { index: usize },
    /// Remove a batch of tasks, all-or-nothing. Indices keep command order.
    Delete { indices: Vec<usize> },
    /// Substring search over descriptions.
    Find { keyword: String },
    /// Terminate the interactive loop.
    Bye,
    /// Surface a message without touching the task list.
    Echo { message: String },
}

/// User-facing result of one applied command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Rendered result text.
    pub text: String,
    /// True only for the terminating command.
    pub exit: bool,
}

impl Response {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exit: false,
        }
    }

    fn farewell(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exit: true,
        }
    }
}

/// Command-level error taxonomy.
///
/// Every variant renders as a recoverable, user-visible message; none
/// terminates the process. Index values are 1-based for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Keyword given without its required argument.
    MissingArgument {
        keyword: &'static str,
        usage: &'static str,
    },
    /// Index-taking keyword followed by an empty index list.
    NoIndexProvided { keyword: &'static str },
    /// An index token is not a positive integer.
    InvalidIndexFormat { token: String },
    /// A well-formed index does not refer to an existing task.
    IndexOutOfRange { index: usize, size: usize },
    /// The same index appears more than once in a batch.
    DuplicateIndex { index: usize },
    /// A date token cannot be parsed.
    MalformedDate { token: String },
    /// Leading keyword matches no known command.
    UnrecognizedCommand { keyword: String },
    /// Task construction rejected the input.
    InvalidTask(TaskValidationError),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingArgument { keyword, usage } => {
                write!(f, "the `{keyword}` command needs an argument; usage: {usage}")
            }
            Self::NoIndexProvided { keyword } => {
                write!(f, "the `{keyword}` command needs at least one task number")
            }
            Self::InvalidIndexFormat { token } => {
                write!(f, "`{token}` is not a valid task number")
            }
            Self::IndexOutOfRange { index, size } => {
                write!(f, "task {index} does not exist; the list has {size} task(s)")
            }
            Self::DuplicateIndex { index } => {
                write!(f, "task {index} appears more than once")
            }
            Self::MalformedDate { token } => {
                write!(f, "`{token}` is not a valid date; expected YYYY-MM-DD")
            }
            Self::UnrecognizedCommand { keyword } => {
                write!(f, "I don't recognize the command `{keyword}`")
            }
            Self::InvalidTask(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTask(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for CommandError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidTask(value)
    }
}
