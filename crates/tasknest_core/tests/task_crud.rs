use chrono::Local;
use tasknest_core::db::open_cache_db_in_memory;
use tasknest_core::{
    LocalCacheRepository, Priority, RepoError, TaskDraft, TaskId, TaskRepository, TaskService,
};

fn service(conn: &rusqlite::Connection) -> TaskService<LocalCacheRepository<'_>> {
    TaskService::new(LocalCacheRepository::new(conn)).unwrap()
}

fn draft(text: &str) -> TaskDraft {
    TaskDraft {
        text: text.to_string(),
        category: "general".to_string(),
        due_date: None,
        priority: Priority::Medium,
    }
}

#[test]
fn create_then_list_contains_task() {
    let conn = open_cache_db_in_memory().unwrap();
    let mut service = service(&conn);

    let created = service.create(draft("buy groceries")).unwrap();

    let listed = service
        .list()
        .iter()
        .find(|task| task.identifier == created.identifier)
        .expect("created task should be listed");
    assert_eq!(listed.text, "buy groceries");
    assert!(!listed.completed);
    assert_eq!(listed.added_date, Local::now().date_naive());
}

#[test]
fn create_rejects_blank_text_and_leaves_collection_unchanged() {
    let conn = open_cache_db_in_memory().unwrap();
    let mut service = service(&conn);
    service.create(draft("existing task")).unwrap();

    for text in ["", "   ", "\t\n"] {
        let err = service.create(draft(text)).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)), "text: {text:?}");
    }

    assert_eq!(service.list().len(), 1);
}

#[test]
fn completion_transitions_track_completed_date() {
    let conn = open_cache_db_in_memory().unwrap();
    let mut service = service(&conn);
    let task = service.create(draft("write report")).unwrap();

    let completed = service.set_completed(&task.identifier, true).unwrap();
    assert!(completed.completed);
    assert_eq!(completed.completed_date, Some(Local::now().date_naive()));

    let reopened = service.set_completed(&task.identifier, false).unwrap();
    assert!(!reopened.completed);
    assert!(reopened.completed_date.is_none());

    for task in service.list() {
        assert!(task.completion_invariant_holds());
    }
}

#[test]
fn set_completed_signals_history_change() {
    let conn = open_cache_db_in_memory().unwrap();
    let mut service = service(&conn);
    let task = service.create(draft("track me")).unwrap();

    assert!(!service.take_completion_history_changed());

    service.set_completed(&task.identifier, true).unwrap();
    assert!(service.take_completion_history_changed());
    // Signal is consumed by the read.
    assert!(!service.take_completion_history_changed());
}

#[test]
fn set_completed_on_unknown_id_returns_not_found() {
    let conn = open_cache_db_in_memory().unwrap();
    let mut service = service(&conn);

    let missing = TaskId::new("no-such-task");
    let err = service.set_completed(&missing, true).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn edit_text_replaces_in_place_and_validates() {
    let conn = open_cache_db_in_memory().unwrap();
    let mut service = service(&conn);
    let task = service.create(draft("old wording")).unwrap();

    let edited = service.edit_text(&task.identifier, "new wording").unwrap();
    assert_eq!(edited.text, "new wording");
    assert_eq!(edited.identifier, task.identifier);
    assert_eq!(edited.added_date, task.added_date);

    let err = service.edit_text(&task.identifier, "  ").unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(service.list()[0].text, "new wording");
}

#[test]
fn delete_twice_first_removes_second_is_noop() {
    let conn = open_cache_db_in_memory().unwrap();
    let mut service = service(&conn);
    let task = service.create(draft("delete me")).unwrap();

    service.delete(&task.identifier).unwrap();
    assert!(service.list().is_empty());

    service
        .delete(&task.identifier)
        .expect("second delete should be a successful no-op");
}

#[test]
fn clear_all_empties_and_persists() {
    let conn = open_cache_db_in_memory().unwrap();
    let mut service = service(&conn);
    service.create(draft("one")).unwrap();
    service.create(draft("two")).unwrap();

    service.clear_all().unwrap();
    assert!(service.list().is_empty());

    // A fresh service over the same store sees the persisted emptiness.
    let reloaded = TaskService::new(LocalCacheRepository::new(&conn)).unwrap();
    assert!(reloaded.list().is_empty());
}

#[test]
fn collection_round_trips_field_for_field() {
    let conn = open_cache_db_in_memory().unwrap();
    let mut service = service(&conn);

    let mut with_due = draft("with due date");
    with_due.due_date = Some("2025-01-15".to_string());
    with_due.priority = Priority::High;
    service.create(with_due).unwrap();

    let plain = service.create(draft("plain")).unwrap();
    service.set_completed(&plain.identifier, true).unwrap();

    let before = service.list().to_vec();

    let repo = LocalCacheRepository::new(&conn);
    let after = repo.load_tasks().unwrap();
    assert_eq!(before, after);
}

#[test]
fn snapshot_order_is_insertion_order() {
    let conn = open_cache_db_in_memory().unwrap();
    let mut service = service(&conn);

    let texts = ["first", "second", "third"];
    for text in texts {
        service.create(draft(text)).unwrap();
    }

    let listed: Vec<_> = service.list().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(listed, texts);
}
