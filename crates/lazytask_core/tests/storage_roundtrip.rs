use chrono::NaiveDate;
use lazytask_core::{LineFileStore, StorageError, Task, TaskKind, TaskList, TaskStore};
use std::fs;
use tempfile::tempdir;

fn sample_list() -> TaskList {
    let by = NaiveDate::from_ymd_opt(2019, 12, 1).unwrap();
    let mut deadline = Task::new(TaskKind::Deadline { by }, "return book").unwrap();
    deadline.mark();

    let mut list = TaskList::new();
    list.add(Task::new(TaskKind::Todo, "read book").unwrap());
    list.add(deadline);
    list.add(
        Task::new(
            TaskKind::Event {
                from: "Mon 2pm".to_string(),
                to: "4pm".to_string(),
            },
            "book fair",
        )
        .unwrap(),
    );
    list
}

#[test]
fn save_then_load_reproduces_the_list() {
    let dir = tempdir().unwrap();
    let store = LineFileStore::new(dir.path().join("tasks.txt"));

    let list = sample_list();
    store.save(&list).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, list);
}

#[test]
fn persisted_lines_use_the_documented_format() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    let store = LineFileStore::new(&path);
    assert_eq!(store.path(), path);

    store.save(&sample_list()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "T|0|read book",
            "D|1|return book|2019-12-01",
            "E|0|book fair|Mon 2pm|4pm",
        ]
    );
}

#[test]
fn load_missing_file_returns_empty_list() {
    let dir = tempdir().unwrap();
    let store = LineFileStore::new(dir.path().join("nothing-here.txt"));

    let loaded = store.load().unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("deep").join("tasks.txt");
    let store = LineFileStore::new(&path);

    store.save(&sample_list()).unwrap();

    assert!(path.exists());
    assert_eq!(store.load().unwrap(), sample_list());
}

#[test]
fn save_leaves_no_staged_file_behind() {
    let dir = tempdir().unwrap();
    let store = LineFileStore::new(dir.path().join("tasks.txt"));

    store.save(&sample_list()).unwrap();

    let entries: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["tasks.txt".to_string()]);
}

#[test]
fn load_rejects_a_malformed_line_with_its_number() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    fs::write(&path, "T|0|read book\nX|0|mystery\n").unwrap();

    let err = LineFileStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StorageError::MalformedLine { line: 2, .. }));
}

#[test]
fn load_skips_blank_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    fs::write(&path, "T|0|read book\n\nT|1|return book\n").unwrap();

    let loaded = LineFileStore::new(&path).load().unwrap();
    assert_eq!(loaded.len(), 2);
    assert!(loaded.get(1).unwrap().done);
}

#[test]
fn load_reports_io_failure_with_path_context() {
    let dir = tempdir().unwrap();
    // The path is an existing directory, so reading it as a file fails.
    let err = LineFileStore::new(dir.path()).load().unwrap_err();

    let message = err.to_string();
    assert!(matches!(err, StorageError::Io { .. }));
    assert!(message.contains("storage failure"));
}

#[test]
fn overwrite_save_replaces_previous_content() {
    let dir = tempdir().unwrap();
    let store = LineFileStore::new(dir.path().join("tasks.txt"));

    store.save(&sample_list()).unwrap();

    let mut shorter = TaskList::new();
    shorter.add(Task::new(TaskKind::Todo, "only one").unwrap());
    store.save(&shorter).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, shorter);
}
