use pocketlist_core::{Task, TaskStore};
use std::collections::HashSet;

#[test]
fn add_appends_unfinished_task_with_fresh_id() {
    let mut store = TaskStore::new();

    let id = store.add("Buy milk").unwrap().id;
    assert_eq!(store.len(), 1);

    let task = &store.tasks()[0];
    assert_eq!(task.id, id);
    assert_eq!(task.title, "Buy milk");
    assert!(!task.done);
}

#[test]
fn add_trims_title() {
    let mut store = TaskStore::new();
    store.add("  Pay rent  ").unwrap();
    assert_eq!(store.tasks()[0].title, "Pay rent");
}

#[test]
fn rapid_adds_issue_distinct_increasing_ids() {
    let mut store = TaskStore::new();
    for n in 0..50 {
        store.add(&format!("task {n}")).unwrap();
    }

    let ids: Vec<_> = store.tasks().iter().map(|task| task.id).collect();
    let distinct: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), 50);
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn add_blank_input_is_a_noop() {
    let mut store = TaskStore::new();
    store.add("keep me").unwrap();

    assert!(store.add("").is_none());
    assert!(store.add("   ").is_none());
    assert!(store.add("\t\n").is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn toggle_done_twice_restores_flag_and_touches_nothing_else() {
    let mut store = seeded_store(&["a", "b", "c"]);
    let before: Vec<Task> = store.tasks().to_vec();

    let toggled = store.toggle_done(1).clone();
    assert!(toggled.done);
    assert_eq!(toggled.id, before[1].id);
    assert_eq!(store.tasks()[0], before[0]);
    assert_eq!(store.tasks()[2], before[2]);

    store.toggle_done(1);
    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn edit_title_trims_and_keeps_identity() {
    let mut store = seeded_store(&["draft"]);
    let id = store.tasks()[0].id;
    store.toggle_done(0);

    let edited = store.edit_title(0, "  New  ");
    assert_eq!(edited.title, "New");
    assert_eq!(edited.id, id);
    assert!(edited.done);
}

#[test]
fn edit_title_blank_input_retains_current_title() {
    let mut store = seeded_store(&["keep"]);

    store.edit_title(0, "");
    assert_eq!(store.tasks()[0].title, "keep");

    store.edit_title(0, "   ");
    assert_eq!(store.tasks()[0].title, "keep");
}

#[test]
fn remove_then_undo_restores_list_exactly() {
    let mut store = seeded_store(&["a", "b", "c"]);
    let before: Vec<Task> = store.tasks().to_vec();

    let removed = store.remove(1);
    assert_eq!(removed.index, 1);
    assert_eq!(removed.task, before[1]);
    assert_eq!(store.len(), 2);

    store.undo_remove(removed);
    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn undo_remove_clamps_out_of_range_index_to_tail() {
    let mut store = seeded_store(&["a", "b", "c"]);
    let removed = store.remove(2);

    store.remove(0);
    store.remove(0);
    assert!(store.is_empty());

    let restored = store.undo_remove(removed).clone();
    assert_eq!(store.len(), 1);
    assert_eq!(store.tasks()[0], restored);
}

#[test]
fn reorder_moves_task_to_target_position() {
    let mut store = seeded_store(&["A", "B", "C"]);

    store.reorder(0, 2);
    assert_eq!(titles(&store), ["B", "C", "A"]);
}

#[test]
fn reorder_toward_head_shifts_others_down() {
    let mut store = seeded_store(&["A", "B", "C"]);

    store.reorder(2, 0);
    assert_eq!(titles(&store), ["C", "A", "B"]);
}

#[test]
fn reorder_keeps_relative_order_of_unmoved_tasks() {
    let mut store = seeded_store(&["A", "B", "C", "D"]);

    store.reorder(1, 2);
    assert_eq!(titles(&store), ["A", "C", "B", "D"]);

    store.reorder(2, 2);
    assert_eq!(titles(&store), ["A", "C", "B", "D"]);
}

#[test]
fn from_tasks_resumes_id_issuance_above_seeded_ids() {
    let seeded = vec![
        Task::new(1_700_000_000_000, "old"),
        Task::new(1_900_000_000_000, "far future id"),
    ];
    let mut store = TaskStore::from_tasks(seeded);

    let id = store.add("newest").unwrap().id;
    assert!(id > 1_900_000_000_000);
}

#[test]
#[should_panic(expected = "toggle_done")]
fn toggle_done_out_of_range_panics() {
    let mut store = seeded_store(&["only"]);
    store.toggle_done(1);
}

#[test]
#[should_panic(expected = "remove")]
fn remove_out_of_range_panics() {
    let mut store = TaskStore::new();
    store.remove(0);
}

#[test]
#[should_panic(expected = "reorder")]
fn reorder_out_of_range_target_panics() {
    let mut store = seeded_store(&["a", "b"]);
    store.reorder(0, 2);
}

fn seeded_store(titles: &[&str]) -> TaskStore {
    let mut store = TaskStore::new();
    for title in titles {
        store.add(title).unwrap();
    }
    store
}

fn titles(store: &TaskStore) -> Vec<&str> {
    store.tasks().iter().map(|task| task.title.as_str()).collect()
}
