//! Task record shared by command and storage layers.
//!
//! # Responsibility
//! - Define the task categories and their scheduling payloads.
//! - Validate task construction before any list or storage mutation.
//!
//! # Invariants
//! - `kind` is immutable after construction; only `done` changes later.
//! - `description` is non-empty and never contains the field delimiter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field separator of the persisted line format. Descriptions must not
/// contain it, so encoded lines stay unambiguous.
pub const FIELD_DELIMITER: char = '|';

/// Date format shared by the command surface and the persisted line format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Category-specific scheduling payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskKind {
    /// Plain to-do without scheduling data.
    Todo,
    /// Due by a calendar date.
    Deadline { by: NaiveDate },
    /// Spans a start and an end, kept as free-form schedule text.
    Event { from: String, to: String },
}

impl TaskKind {
    /// One-letter code used by the persisted line format and renderings.
    pub fn type_code(&self) -> &'static str {
        match self {
            Self::Todo => "T",
            Self::Deadline { .. } => "D",
            Self::Event { .. } => "E",
        }
    }
}

/// Validation failures for task construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Description is empty or whitespace-only.
    EmptyDescription,
    /// Description contains the persisted-format field delimiter.
    ReservedDelimiter(char),
    /// An event schedule field is blank.
    BlankScheduleField(&'static str),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "task description cannot be empty"),
            Self::ReservedDelimiter(delimiter) => {
                write!(f, "task description cannot contain `{delimiter}`")
            }
            Self::BlankScheduleField(field) => write!(f, "event `{field}` cannot be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// User-facing description text.
    pub description: String,
    /// Completion flag; starts `false`.
    pub done: bool,
    /// Category payload, fixed at construction.
    pub kind: TaskKind,
}

impl Task {
    /// Creates a task in the not-done state.
    ///
    /// # Errors
    /// - Rejects empty descriptions, descriptions containing the field
    ///   delimiter, and blank event schedule fields.
    pub fn new(
        kind: TaskKind,
        description: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            description: description.into(),
            done: false,
            kind,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks construction invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.description.trim().is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }
        if self.description.contains(FIELD_DELIMITER) {
            return Err(TaskValidationError::ReservedDelimiter(FIELD_DELIMITER));
        }
        if let TaskKind::Event { from, to } = &self.kind {
            if from.trim().is_empty() {
                return Err(TaskValidationError::BlankScheduleField("from"));
            }
            if to.trim().is_empty() {
                return Err(TaskValidationError::BlankScheduleField("to"));
            }
        }
        Ok(())
    }

    /// Sets the done flag.
    pub fn mark(&mut self) {
        self.done = true;
    }

    /// Clears the done flag.
    pub fn unmark(&mut self) {
        self.done = false;
    }

    /// Completion glyph rendered inside the status brackets.
    pub fn status_icon(&self) -> &'static str {
        if self.done {
            "X"
        } else {
            " "
        }
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}][{}] {}",
            self.kind.type_code(),
            self.status_icon(),
            self.description
        )?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {})", by.format("%-d %b %Y")),
            TaskKind::Event { from, to } => write!(f, " (from: {from} to: {to})"),
        }
    }
}
