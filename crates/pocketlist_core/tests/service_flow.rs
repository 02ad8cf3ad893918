use pocketlist_core::db::open_db_in_memory;
use pocketlist_core::{
    load_store, SnapshotError, SnapshotRepository, SnapshotResult, SqliteSnapshotRepository, Task,
    TaskListService, TaskStore,
};
use std::cell::RefCell;

#[test]
fn mutations_are_mirrored_to_the_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let mut store = TaskStore::new();

    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut service = TaskListService::new(&mut store, repo);
    service.add("Buy milk");
    service.add("Pay rent");
    service.toggle_done(1);

    let reread = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let persisted = reread.load_tasks().unwrap();
    assert_eq!(persisted.len(), 2);
    assert_eq!(persisted[0].title, "Buy milk");
    assert!(!persisted[0].done);
    assert_eq!(persisted[1].title, "Pay rent");
    assert!(persisted[1].done);
}

#[test]
fn startup_seeds_store_from_persisted_snapshot() {
    let conn = open_db_in_memory().unwrap();

    let mut store = TaskStore::new();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut service = TaskListService::new(&mut store, repo);
    service.add("survives restart");
    let saved_id = service.tasks()[0].id;

    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let restarted = load_store(&repo).unwrap();
    assert_eq!(restarted.len(), 1);
    assert_eq!(restarted.tasks()[0].id, saved_id);
    assert_eq!(restarted.tasks()[0].title, "survives restart");
}

#[test]
fn startup_on_fresh_database_yields_empty_store() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    let store = load_store(&repo).unwrap();
    assert!(store.is_empty());
}

#[test]
fn remove_and_undo_round_trip_through_service() {
    let conn = open_db_in_memory().unwrap();
    let mut store = TaskStore::new();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut service = TaskListService::new(&mut store, repo);
    service.add("a");
    service.add("b");
    service.add("c");
    let before: Vec<Task> = service.tasks().to_vec();

    let removed = service.remove(1);
    assert_eq!(service.tasks().len(), 2);

    service.undo_remove(removed);
    assert_eq!(service.tasks(), before.as_slice());

    let reread = SqliteSnapshotRepository::try_new(&conn).unwrap();
    assert_eq!(reread.load_tasks().unwrap(), before);
}

#[test]
fn blank_input_mutates_nothing_and_saves_nothing() {
    let recording = RecordingRepository::default();
    let mut store = TaskStore::new();

    let mut service = TaskListService::new(&mut store, &recording);
    service.add("real task");
    service.add("   ");
    service.edit_title(0, "");

    assert_eq!(service.tasks().len(), 1);
    assert_eq!(service.tasks()[0].title, "real task");
    assert_eq!(recording.saves.borrow().len(), 1);
}

#[test]
fn save_failure_never_blocks_in_memory_mutation() {
    let mut store = TaskStore::new();

    let mut service = TaskListService::new(&mut store, FailingRepository);
    service.add("kept despite failed save");
    service.toggle_done(0);
    let removed = service.remove(0);
    service.undo_remove(removed);

    assert_eq!(service.tasks().len(), 1);
    assert_eq!(service.tasks()[0].title, "kept despite failed save");
    assert!(service.tasks()[0].done);
}

#[test]
fn reorder_through_service_is_persisted_in_new_order() {
    let conn = open_db_in_memory().unwrap();
    let mut store = TaskStore::new();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut service = TaskListService::new(&mut store, repo);
    service.add("A");
    service.add("B");
    service.add("C");

    service.reorder(0, 2);

    let reread = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let titles: Vec<String> = reread
        .load_tasks()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(titles, ["B", "C", "A"]);
}

#[derive(Default)]
struct RecordingRepository {
    saves: RefCell<Vec<Vec<Task>>>,
}

impl SnapshotRepository for &RecordingRepository {
    fn save_tasks(&self, tasks: &[Task]) -> SnapshotResult<()> {
        self.saves.borrow_mut().push(tasks.to_vec());
        Ok(())
    }

    fn load_tasks(&self) -> SnapshotResult<Vec<Task>> {
        Ok(Vec::new())
    }
}

struct FailingRepository;

impl SnapshotRepository for FailingRepository {
    fn save_tasks(&self, _tasks: &[Task]) -> SnapshotResult<()> {
        Err(SnapshotError::MissingRequiredTable("kv_slots"))
    }

    fn load_tasks(&self) -> SnapshotResult<Vec<Task>> {
        Err(SnapshotError::MissingRequiredTable("kv_slots"))
    }
}
