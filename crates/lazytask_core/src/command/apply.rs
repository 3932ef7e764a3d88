//! Command execution against the task list.
//!
//! # Responsibility
//! - Apply one validated command and render its user-facing response.
//! - Keep batch deletion all-or-nothing.
//!
//! # Invariants
//! - A returned error means the list was not modified.
//! - Batch removal runs highest-index-first so earlier removals never shift
//!   later targets.

use crate::command::{Command, CommandError, Response};
use crate::model::list::TaskList;
use crate::model::task::Task;
use log::info;

const FAREWELL: &str = "Bye. Hope to see you again soon!";

/// Applies a parsed command, mutating the list for mutating variants.
///
/// # Errors
/// - Index errors are re-raised here as a defense against commands applied
///   to a list that changed after parsing; the batch check runs before any
///   removal so delete stays all-or-nothing.
pub fn apply(command: Command, list: &mut TaskList) -> Result<Response, CommandError> {
    match command {
        Command::Add(task) => Ok(apply_add(task, list)),
        Command::List => Ok(render_list(list)),
        Command::Mark { index } => apply_mark(index, list),
        Command::Unmark { index } => apply_unmark(index, list),
        Command::Delete { indices } => apply_delete(&indices, list),
        Command::Find { keyword } => Ok(render_find(&keyword, list)),
        Command::Bye => Ok(Response::farewell(FAREWELL)),
        Command::Echo { message } => Ok(Response::new(message)),
    }
}

fn apply_add(task: Task, list: &mut TaskList) -> Response {
    let rendered = task.to_string();
    list.add(task);
    info!("event=task_added module=command size={}", list.len());
    Response::new(format!(
        "Got it. I've added this task:\n  {rendered}\nNow you have {} {} in the list.",
        list.len(),
        task_noun(list.len())
    ))
}

fn apply_mark(index: usize, list: &mut TaskList) -> Result<Response, CommandError> {
    let size = list.len();
    let task = list
        .mark(index)
        .ok_or(CommandError::IndexOutOfRange {
            index: index + 1,
            size,
        })?;
    Ok(Response::new(format!(
        "Nice! I've marked this task as done:\n  {task}"
    )))
}

fn apply_unmark(index: usize, list: &mut TaskList) -> Result<Response, CommandError> {
    let size = list.len();
    let task = list
        .unmark(index)
        .ok_or(CommandError::IndexOutOfRange {
            index: index + 1,
            size,
        })?;
    Ok(Response::new(format!(
        "OK, I've marked this task as not done yet:\n  {task}"
    )))
}

fn apply_delete(indices: &[usize], list: &mut TaskList) -> Result<Response, CommandError> {
    // Snapshot the whole batch first; a single bad index rejects the
    // command before any removal.
    let mut snapshots = Vec::with_capacity(indices.len());
    for &index in indices {
        match list.get(index) {
            Some(task) => snapshots.push(task.clone()),
            None => {
                return Err(CommandError::IndexOutOfRange {
                    index: index + 1,
                    size: list.len(),
                });
            }
        }
    }

    let mut order: Vec<usize> = indices.to_vec();
    order.sort_unstable();
    for &index in order.iter().rev() {
        // Distinct, pre-checked indices; descending order keeps them stable.
        let _ = list.remove(index);
    }

    info!(
        "event=tasks_deleted module=command removed={} size={}",
        snapshots.len(),
        list.len()
    );

    let mut text = String::from("Noted. I've removed the following tasks:\n");
    for task in &snapshots {
        text.push_str(&format!("  {task}\n"));
    }
    text.push_str(&format!(
        "Now you have {} {} in the list.",
        list.len(),
        task_noun(list.len())
    ));
    Ok(Response::new(text))
}

fn render_list(list: &TaskList) -> Response {
    if list.is_empty() {
        return Response::new("Your task list is empty.");
    }
    let mut text = String::from("Here are the tasks in your list:\n");
    for (position, task) in list.iter().enumerate() {
        text.push_str(&format!("  {}. {task}\n", position + 1));
    }
    Response::new(text.trim_end().to_string())
}

fn render_find(keyword: &str, list: &TaskList) -> Response {
    let matches = list.find(keyword);
    if matches.is_empty() {
        return Response::new("No results.");
    }
    let mut text = String::from("Here are the matching tasks in your list:\n");
    for (position, (_, task)) in matches.iter().enumerate() {
        text.push_str(&format!("  {}. {task}\n", position + 1));
    }
    Response::new(text.trim_end().to_string())
}

fn task_noun(count: usize) -> &'static str {
    if count == 1 {
        "task"
    } else {
        "tasks"
    }
}
