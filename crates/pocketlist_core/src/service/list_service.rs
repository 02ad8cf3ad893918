//! Task-list use-case service.
//!
//! # Responsibility
//! - Apply one store mutation, then mirror the new list to the snapshot
//!   repository.
//! - Seed a store from the persisted snapshot at startup.
//!
//! # Invariants
//! - The in-memory list is the source of truth: a failed save is logged and
//!   swallowed, never rolled back into list state.
//! - Blank add/edit input mutates nothing and therefore saves nothing.
//! - Log events carry metadata only; task titles never appear in logs.

use crate::model::task::Task;
use crate::repo::snapshot_repo::{SnapshotRepository, SnapshotResult};
use crate::store::task_store::{RemovedTask, TaskStore};
use log::{debug, info, warn};

/// Seeds a store from the persisted snapshot.
///
/// Absent snapshot yields an empty store (first run). Undecodable data is a
/// typed error for the caller to surface; the snapshot is never silently
/// discarded.
pub fn load_store(repo: &impl SnapshotRepository) -> SnapshotResult<TaskStore> {
    let tasks = repo.load_tasks()?;
    info!(
        "event=snapshot_load module=service status=ok len={}",
        tasks.len()
    );
    Ok(TaskStore::from_tasks(tasks))
}

/// Use-case facade over the store and the snapshot repository.
///
/// Borrows the shell-owned store for the duration of one interaction and
/// carries the repository for the mirror write after each mutation.
pub struct TaskListService<'store, R: SnapshotRepository> {
    store: &'store mut TaskStore,
    repo: R,
}

impl<'store, R: SnapshotRepository> TaskListService<'store, R> {
    /// Creates a service around the shell-owned store.
    pub fn new(store: &'store mut TaskStore, repo: R) -> Self {
        Self { store, repo }
    }

    /// Current list in user order.
    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    /// Appends a task from raw input and mirrors the list.
    ///
    /// Blank input is a no-op: nothing is added and nothing is saved.
    pub fn add(&mut self, raw_title: &str) -> &[Task] {
        match self.store.add(raw_title).map(|task| task.id) {
            Some(id) => {
                debug!(
                    "event=task_add module=service status=ok id={id} len={}",
                    self.store.len()
                );
                self.persist();
            }
            None => debug!("event=task_add module=service status=noop reason=blank_input"),
        }
        self.store.tasks()
    }

    /// Flips completion at `index` and mirrors the list.
    ///
    /// # Panics
    /// Propagates the store's out-of-range panic.
    pub fn toggle_done(&mut self, index: usize) -> &[Task] {
        let task = self.store.toggle_done(index);
        debug!(
            "event=task_toggle module=service status=ok id={} done={}",
            task.id, task.done
        );
        self.persist();
        self.store.tasks()
    }

    /// Replaces the title at `index` from raw input and mirrors the list.
    ///
    /// Blank input retains the current title and skips the save.
    ///
    /// # Panics
    /// Propagates the store's out-of-range panic.
    pub fn edit_title(&mut self, index: usize, raw_title: &str) -> &[Task] {
        let blank = raw_title.trim().is_empty();
        let id = self.store.edit_title(index, raw_title).id;
        if blank {
            debug!("event=task_edit module=service status=noop reason=blank_input");
        } else {
            debug!("event=task_edit module=service status=ok id={id}");
            self.persist();
        }
        self.store.tasks()
    }

    /// Removes the task at `index`, mirrors the list, and hands the removed
    /// task back so the caller can offer undo.
    ///
    /// # Panics
    /// Propagates the store's out-of-range panic.
    pub fn remove(&mut self, index: usize) -> RemovedTask {
        let removed = self.store.remove(index);
        debug!(
            "event=task_remove module=service status=ok id={} index={} len={}",
            removed.task.id,
            removed.index,
            self.store.len()
        );
        self.persist();
        removed
    }

    /// Re-inserts a removed task at its captured (clamped) position and
    /// mirrors the list.
    pub fn undo_remove(&mut self, removed: RemovedTask) -> &[Task] {
        let id = self.store.undo_remove(removed).id;
        debug!(
            "event=task_undo_remove module=service status=ok id={id} len={}",
            self.store.len()
        );
        self.persist();
        self.store.tasks()
    }

    /// Moves a task to a new position and mirrors the list.
    ///
    /// # Panics
    /// Propagates the store's out-of-range panic.
    pub fn reorder(&mut self, old_index: usize, new_index: usize) -> &[Task] {
        self.store.reorder(old_index, new_index);
        debug!(
            "event=task_reorder module=service status=ok old_index={old_index} new_index={new_index}"
        );
        self.persist();
        self.store.tasks()
    }

    /// Fire-and-forget mirror of the current list.
    ///
    /// Failure means the durable copy lags memory until the next successful
    /// save; the UI keeps rendering from memory either way.
    fn persist(&self) {
        if let Err(err) = self.repo.save_tasks(self.store.tasks()) {
            warn!("event=snapshot_save module=service status=error error={err}");
        }
    }
}
