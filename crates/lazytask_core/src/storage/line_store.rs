//! Line-oriented file store.
//!
//! # Responsibility
//! - Encode and decode one task per line:
//!   `<type-code>|<done-flag>|<description>[|<date-1>[|<date-2>]]`.
//! - Replace the backing file atomically on save.
//!
//! # Invariants
//! - Deadline dates round-trip through `%Y-%m-%d`.
//! - A decode failure on any line fails the whole load; the session layer
//!   falls back to an empty list and warns the user.

use crate::model::list::TaskList;
use crate::model::task::{Task, TaskKind, DATE_FORMAT, FIELD_DELIMITER};
use crate::storage::{StorageError, StorageResult, TaskStore};
use chrono::NaiveDate;
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed task store writing one task per line.
pub struct LineFileStore {
    path: PathBuf,
}

impl LineFileStore {
    /// Creates a store over the given backing file path. The file does not
    /// have to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TaskStore for LineFileStore {
    fn load(&self) -> StorageResult<TaskList> {
        if !self.path.exists() {
            info!("event=store_load module=storage status=ok tasks=0 reason=missing_file");
            return Ok(TaskList::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|err| {
            error!("event=store_load module=storage status=error error={err}");
            self.io_error(err)
        })?;

        let mut tasks = Vec::new();
        for (number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match decode_line(line, number + 1) {
                Ok(task) => tasks.push(task),
                Err(err) => {
                    error!(
                        "event=store_load module=storage status=error line={} error={err}",
                        number + 1
                    );
                    return Err(err);
                }
            }
        }

        info!(
            "event=store_load module=storage status=ok tasks={}",
            tasks.len()
        );
        Ok(TaskList::from_tasks(tasks))
    }

    fn save(&self, list: &TaskList) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
            }
        }

        let mut content = String::new();
        for task in list {
            content.push_str(&encode_task(task));
            content.push('\n');
        }

        // Stage the whole list in a sibling file; the rename makes the
        // replacement atomic from the next load's perspective.
        let staged = staged_path(&self.path);
        fs::write(&staged, content).map_err(|err| self.io_error(err))?;
        fs::rename(&staged, &self.path).map_err(|err| {
            let _ = fs::remove_file(&staged);
            error!("event=store_save module=storage status=error error={err}");
            self.io_error(err)
        })?;

        info!(
            "event=store_save module=storage status=ok tasks={}",
            list.len()
        );
        Ok(())
    }
}

fn staged_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "tasks.txt".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Encodes one task into its persisted line form.
fn encode_task(task: &Task) -> String {
    let done_flag = if task.done { "1" } else { "0" };
    let mut line = format!(
        "{}{FIELD_DELIMITER}{done_flag}{FIELD_DELIMITER}{}",
        task.kind.type_code(),
        task.description
    );
    match &task.kind {
        TaskKind::Todo => {}
        TaskKind::Deadline { by } => {
            line.push(FIELD_DELIMITER);
            line.push_str(&by.format(DATE_FORMAT).to_string());
        }
        TaskKind::Event { from, to } => {
            line.push(FIELD_DELIMITER);
            line.push_str(from);
            line.push(FIELD_DELIMITER);
            line.push_str(to);
        }
    }
    line
}

/// Decodes one persisted line back into a task.
fn decode_line(line: &str, number: usize) -> StorageResult<Task> {
    let malformed = |message: String| StorageError::MalformedLine {
        line: number,
        message,
    };

    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() < 3 {
        return Err(malformed(format!(
            "expected at least 3 fields, found {}",
            fields.len()
        )));
    }

    let done = match fields[1] {
        "0" => false,
        "1" => true,
        other => return Err(malformed(format!("invalid done flag `{other}`"))),
    };

    let kind = match (fields[0], fields.len()) {
        ("T", 3) => TaskKind::Todo,
        ("D", 4) => {
            let by = NaiveDate::parse_from_str(fields[3], DATE_FORMAT)
                .map_err(|_| malformed(format!("invalid deadline date `{}`", fields[3])))?;
            TaskKind::Deadline { by }
        }
        ("E", 5) => TaskKind::Event {
            from: fields[3].to_string(),
            to: fields[4].to_string(),
        },
        ("T" | "D" | "E", count) => {
            return Err(malformed(format!(
                "wrong field count {count} for type `{}`",
                fields[0]
            )));
        }
        (other, _) => return Err(malformed(format!("unknown type code `{other}`"))),
    };

    let mut task = Task::new(kind, fields[2]).map_err(|err| malformed(err.to_string()))?;
    if done {
        task.mark();
    }
    Ok(task)
}
