//! Ordered task list owner and its mutation operations.
//!
//! # Responsibility
//! - Hold the authoritative in-memory list and issue stable task ids.
//! - Implement add/toggle/edit/remove/undo/reorder with their input rules.
//!
//! # Invariants
//! - All task ids are distinct and issued in strictly increasing order.
//! - No task has a blank title at rest; blank input to add/edit is a no-op.
//! - Operations never reorder tasks other than the one they address.
//!
//! Index arguments are caller contract: the UI derives them from the list it
//! just rendered. Out-of-range indices are programming errors and panic; the
//! FFI layer screens indices before calling in.

use crate::model::task::{Task, TaskId};
use std::time::{SystemTime, UNIX_EPOCH};

/// A task captured by [`TaskStore::remove`] together with the position it
/// was removed from, so the caller can offer a single-level undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedTask {
    /// The removed task, ownership transferred to the caller.
    pub task: Task,
    /// The index the task occupied before removal.
    pub index: usize,
}

/// Owner of the ordered task list.
///
/// Pure in-memory logic: no I/O, no logging. One instance is owned by the
/// single UI-driving context; concurrent mutation requires external
/// serialization.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    last_issued_id: TaskId,
}

impl TaskStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded from a previously persisted list.
    ///
    /// Id issuance resumes above the largest seeded id so re-loaded stores
    /// never reissue an identity.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let last_issued_id = tasks.iter().map(|task| task.id).max().unwrap_or(0);
        Self {
            tasks,
            last_issued_id,
        }
    }

    /// Current list in user order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks in the list.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Appends a new unfinished task with the trimmed title.
    ///
    /// Blank input (empty or whitespace-only after trim) is a defined no-op
    /// and returns `None`; the list is unchanged.
    pub fn add(&mut self, raw_title: &str) -> Option<&Task> {
        let title = normalize_title(raw_title)?;
        let id = self.next_task_id();
        self.tasks.push(Task::new(id, title));
        self.tasks.last()
    }

    /// Flips the completion flag of the task at `index`.
    ///
    /// # Panics
    /// Panics when `index >= len`.
    pub fn toggle_done(&mut self, index: usize) -> &Task {
        self.check_index(index, "toggle_done");
        let task = &mut self.tasks[index];
        task.done = !task.done;
        task
    }

    /// Replaces the title of the task at `index` with the trimmed input.
    ///
    /// Blank input retains the existing title, so an edit can never produce
    /// a blank title at rest. Identity and completion flag are unchanged
    /// either way.
    ///
    /// # Panics
    /// Panics when `index >= len`.
    pub fn edit_title(&mut self, index: usize, raw_title: &str) -> &Task {
        self.check_index(index, "edit_title");
        if let Some(title) = normalize_title(raw_title) {
            self.tasks[index].title = title;
        }
        &self.tasks[index]
    }

    /// Removes the task at `index` and returns it with its original
    /// position for a later [`undo_remove`](Self::undo_remove).
    ///
    /// The store retains nothing about the removed task.
    ///
    /// # Panics
    /// Panics when `index >= len`.
    pub fn remove(&mut self, index: usize) -> RemovedTask {
        self.check_index(index, "remove");
        RemovedTask {
            task: self.tasks.remove(index),
            index,
        }
    }

    /// Re-inserts a previously removed task at its captured position.
    ///
    /// The insertion index is clamped to the current `[0, len]` range: when
    /// the list shrank since the removal, the task lands at the tail instead
    /// of failing. This is the only coercive edge-case policy in the store.
    pub fn undo_remove(&mut self, removed: RemovedTask) -> &Task {
        let index = removed.index.min(self.tasks.len());
        self.tasks.insert(index, removed.task);
        &self.tasks[index]
    }

    /// Moves the task at `old_index` so it ends up at `new_index` in the
    /// resulting list; all other tasks keep their relative order.
    ///
    /// # Panics
    /// Panics when either index is out of range for the pre-move length.
    pub fn reorder(&mut self, old_index: usize, new_index: usize) {
        self.check_index(old_index, "reorder");
        self.check_index(new_index, "reorder");
        let task = self.tasks.remove(old_index);
        self.tasks.insert(new_index, task);
    }

    /// Issues the next task id.
    ///
    /// Epoch milliseconds, clamped to strictly exceed the last issued id so
    /// same-millisecond adds and backwards clock steps still produce unique,
    /// increasing ids.
    fn next_task_id(&mut self) -> TaskId {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as TaskId)
            .unwrap_or(0);
        let id = now_ms.max(self.last_issued_id + 1);
        self.last_issued_id = id;
        id
    }

    fn check_index(&self, index: usize, operation: &str) {
        assert!(
            index < self.tasks.len(),
            "{operation}: index {index} out of range for list of {}",
            self.tasks.len()
        );
    }
}

/// Trims display text; `None` marks blank input that must not reach the
/// list.
fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::normalize_title;

    #[test]
    fn normalize_title_trims_and_screens_blank() {
        assert_eq!(normalize_title("  New  ").as_deref(), Some("New"));
        assert_eq!(normalize_title("   "), None);
        assert_eq!(normalize_title(""), None);
    }
}
