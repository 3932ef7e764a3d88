use chrono::NaiveDate;
use lazytask_core::{Task, TaskKind, TaskValidationError};

#[test]
fn new_task_starts_not_done() {
    let task = Task::new(TaskKind::Todo, "read book").unwrap();

    assert_eq!(task.description, "read book");
    assert!(!task.done);
    assert_eq!(task.kind, TaskKind::Todo);
}

#[test]
fn mark_and_unmark_round_trip() {
    let mut task = Task::new(TaskKind::Todo, "read book").unwrap();

    task.mark();
    assert!(task.done);
    assert_eq!(task.status_icon(), "X");

    task.unmark();
    assert!(!task.done);
    assert_eq!(task.status_icon(), " ");
}

#[test]
fn rendering_includes_type_and_status() {
    let todo = Task::new(TaskKind::Todo, "read book").unwrap();
    assert_eq!(todo.to_string(), "[T][ ] read book");

    let by = NaiveDate::from_ymd_opt(2019, 12, 1).unwrap();
    let mut deadline = Task::new(TaskKind::Deadline { by }, "return book").unwrap();
    deadline.mark();
    assert_eq!(deadline.to_string(), "[D][X] return book (by: 1 Dec 2019)");

    let event = Task::new(
        TaskKind::Event {
            from: "Mon 2pm".to_string(),
            to: "4pm".to_string(),
        },
        "book fair",
    )
    .unwrap();
    assert_eq!(event.to_string(), "[E][ ] book fair (from: Mon 2pm to: 4pm)");
}

#[test]
fn new_rejects_empty_description() {
    let err = Task::new(TaskKind::Todo, "").unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyDescription);

    let err = Task::new(TaskKind::Todo, "   ").unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyDescription);
}

#[test]
fn new_rejects_field_delimiter_in_description() {
    let err = Task::new(TaskKind::Todo, "read|book").unwrap_err();
    assert_eq!(err, TaskValidationError::ReservedDelimiter('|'));
}

#[test]
fn new_rejects_blank_event_schedule_fields() {
    let err = Task::new(
        TaskKind::Event {
            from: " ".to_string(),
            to: "4pm".to_string(),
        },
        "book fair",
    )
    .unwrap_err();
    assert_eq!(err, TaskValidationError::BlankScheduleField("from"));

    let err = Task::new(
        TaskKind::Event {
            from: "Mon 2pm".to_string(),
            to: String::new(),
        },
        "book fair",
    )
    .unwrap_err();
    assert_eq!(err, TaskValidationError::BlankScheduleField("to"));
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let by = NaiveDate::from_ymd_opt(2019, 12, 1).unwrap();
    let mut task = Task::new(TaskKind::Deadline { by }, "return book").unwrap();
    task.mark();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["description"], "return book");
    assert_eq!(json["done"], true);
    assert_eq!(json["kind"]["type"], "deadline");
    assert_eq!(json["kind"]["by"], "2019-12-01");

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}
