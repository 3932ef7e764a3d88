//! Raw-text command parsing.
//!
//! # Responsibility
//! - Dispatch on the leading keyword and build a validated [`Command`].
//! - Convert the 1-based user index surface to 0-based exactly once.
//!
//! # Invariants
//! - Parsing reads the task list for index validation but never mutates it.
//! - Every returned command has passed full argument validation.

use crate::command::{Command, CommandError};
use crate::model::list::TaskList;
use crate::model::task::{Task, TaskKind, DATE_FORMAT};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

const TODO_USAGE: &str = "todo <description>";
const DEADLINE_USAGE: &str = "deadline <description> by <yyyy-mm-dd>";
const EVENT_USAGE: &str = "event <description> from <start> to <end>";
const MARK_USAGE: &str = "mark <task number>";
const UNMARK_USAGE: &str = "unmark <task number>";
const DELETE_USAGE: &str = "delete <task number> [task number...]";
const FIND_USAGE: &str = "find <keyword>";

const BLANK_INPUT_HINT: &str = "Say something like `todo read book` or `list`.";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static BY_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+by\s+").expect("valid by separator regex"));
static FROM_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+from\s+").expect("valid from separator regex"));
static TO_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+to\s+").expect("valid to separator regex"));

/// Parses one line of raw input into a validated command.
///
/// The task list is read for index validation only; mutation happens in
/// [`crate::command::apply()`]. Blank input maps to the non-mutating
/// [`Command::Echo`] variant instead of an error.
///
/// # Errors
/// - Returns one of the [`CommandError`] kinds; the list is never modified.
pub fn parse(input: &str, list: &TaskList) -> Result<Command, CommandError> {
    if input.trim().is_empty() {
        return Ok(Command::Echo {
            message: BLANK_INPUT_HINT.to_string(),
        });
    }

    let body = input.trim_start();
    let (keyword, rest) = match body.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, Some(rest)),
        None => (body, None),
    };

    match keyword {
        "list" => Ok(Command::List),
        "bye" => Ok(Command::Bye),
        "todo" => parse_todo(rest),
        "deadline" => parse_deadline(rest),
        "event" => parse_event(rest),
        "mark" => Ok(Command::Mark {
            index: parse_single_index("mark", MARK_USAGE, rest, list)?,
        }),
        "unmark" => Ok(Command::Unmark {
            index: parse_single_index("unmark", UNMARK_USAGE, rest, list)?,
        }),
        "delete" => parse_delete(rest, list),
        "find" => parse_find(rest),
        other => Err(CommandError::UnrecognizedCommand {
            keyword: other.to_string(),
        }),
    }
}

fn parse_todo(rest: Option<&str>) -> Result<Command, CommandError> {
    let description = required_text("todo", TODO_USAGE, rest)?;
    let task = Task::new(TaskKind::Todo, description)?;
    Ok(Command::Add(task))
}

fn parse_deadline(rest: Option<&str>) -> Result<Command, CommandError> {
    let body = required_text("deadline", DEADLINE_USAGE, rest)?;
    // Split on the last `by` so descriptions may themselves contain one.
    let (description, date_token) =
        split_last(&BY_SEPARATOR_RE, &body).ok_or(CommandError::MissingArgument {
            keyword: "deadline",
            usage: DEADLINE_USAGE,
        })?;
    let by = NaiveDate::parse_from_str(&date_token, DATE_FORMAT).map_err(|_| {
        CommandError::MalformedDate {
            token: date_token.clone(),
        }
    })?;
    let task = Task::new(TaskKind::Deadline { by }, description)?;
    Ok(Command::Add(task))
}

fn parse_event(rest: Option<&str>) -> Result<Command, CommandError> {
    let body = required_text("event", EVENT_USAGE, rest)?;
    let missing = CommandError::MissingArgument {
        keyword: "event",
        usage: EVENT_USAGE,
    };
    let (description, schedule) =
        split_last(&FROM_SEPARATOR_RE, &body).ok_or_else(|| missing.clone())?;
    let (from, to) = split_last(&TO_SEPARATOR_RE, &schedule).ok_or(missing)?;
    let task = Task::new(TaskKind::Event { from, to }, description)?;
    Ok(Command::Add(task))
}

fn parse_delete(rest: Option<&str>, list: &TaskList) -> Result<Command, CommandError> {
    let Some(rest) = rest else {
        return Err(CommandError::MissingArgument {
            keyword: "delete",
            usage: DELETE_USAGE,
        });
    };

    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(CommandError::NoIndexProvided { keyword: "delete" });
    }

    let mut seen = HashSet::new();
    let mut indices = Vec::with_capacity(tokens.len());
    for token in tokens {
        let index = parse_index_token(token, list)?;
        if !seen.insert(index) {
            return Err(CommandError::DuplicateIndex { index: index + 1 });
        }
        indices.push(index);
    }

    Ok(Command::Delete { indices })
}

fn parse_find(rest: Option<&str>) -> Result<Command, CommandError> {
    let keyword = rest.map(str::trim).unwrap_or_default();
    if keyword.is_empty() {
        return Err(CommandError::MissingArgument {
            keyword: "find",
            usage: FIND_USAGE,
        });
    }
    Ok(Command::Find {
        keyword: keyword.to_string(),
    })
}

fn parse_single_index(
    keyword: &'static str,
    usage: &'static str,
    rest: Option<&str>,
    list: &TaskList,
) -> Result<usize, CommandError> {
    let Some(rest) = rest else {
        return Err(CommandError::MissingArgument { keyword, usage });
    };
    let Some(token) = rest.split_whitespace().next() else {
        return Err(CommandError::NoIndexProvided { keyword });
    };
    parse_index_token(token, list)
}

/// Parses one 1-based index token and converts it to 0-based.
fn parse_index_token(token: &str, list: &TaskList) -> Result<usize, CommandError> {
    let display: usize = token
        .parse()
        .map_err(|_| CommandError::InvalidIndexFormat {
            token: token.to_string(),
        })?;
    if display == 0 || display > list.len() {
        return Err(CommandError::IndexOutOfRange {
            index: display,
            size: list.len(),
        });
    }
    Ok(display - 1)
}

fn required_text(
    keyword: &'static str,
    usage: &'static str,
    rest: Option<&str>,
) -> Result<String, CommandError> {
    let text = rest.map(normalize_whitespace).unwrap_or_default();
    if text.is_empty() {
        return Err(CommandError::MissingArgument { keyword, usage });
    }
    Ok(text)
}

/// Collapses interior whitespace runs and trims the ends.
fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// Splits `body` at the last match of `separator`, trimming both halves.
/// Returns `None` when the separator is absent or either half is empty.
fn split_last(separator: &Regex, body: &str) -> Option<(String, String)> {
    let found = separator.find_iter(body).last()?;
    let head = body[..found.start()].trim();
    let tail = body[found.end()..].trim();
    if head.is_empty() || tail.is_empty() {
        return None;
    }
    Some((head.to_string(), tail.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{normalize_whitespace, parse_index_token, split_last, BY_SEPARATOR_RE};
    use crate::command::CommandError;
    use crate::model::list::TaskList;
    use crate::model::task::{Task, TaskKind};

    fn two_task_list() -> TaskList {
        let mut list = TaskList::new();
        list.add(Task::new(TaskKind::Todo, "one").unwrap());
        list.add(Task::new(TaskKind::Todo, "two").unwrap());
        list
    }

    #[test]
    fn normalize_whitespace_collapses_runs() {
        assert_eq!(normalize_whitespace("  read   the\tbook "), "read the book");
    }

    #[test]
    fn split_last_uses_final_separator() {
        let (head, tail) = split_last(&BY_SEPARATOR_RE, "drop by office by 2024-06-01").unwrap();
        assert_eq!(head, "drop by office");
        assert_eq!(tail, "2024-06-01");
    }

    #[test]
    fn split_last_rejects_empty_halves() {
        assert!(split_last(&BY_SEPARATOR_RE, "thing by ").is_none());
        assert!(split_last(&BY_SEPARATOR_RE, "no separator").is_none());
    }

    #[test]
    fn index_token_converts_to_zero_based() {
        let list = two_task_list();
        assert_eq!(parse_index_token("1", &list).unwrap(), 0);
        assert_eq!(parse_index_token("2", &list).unwrap(), 1);
    }

    #[test]
    fn index_token_zero_is_out_of_range() {
        let list = two_task_list();
        let err = parse_index_token("0", &list).unwrap_err();
        assert_eq!(err, CommandError::IndexOutOfRange { index: 0, size: 2 });
    }

    #[test]
    fn index_token_rejects_non_numeric() {
        let list = two_task_list();
        let err = parse_index_token("two", &list).unwrap_err();
        assert_eq!(
            err,
            CommandError::InvalidIndexFormat {
                token: "two".to_string()
            }
        );
    }
}
