//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level task operations to Dart via FRB.
//! - Hold the process-global task store and serialize access to it.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary: index
//!   arguments are validated here before they reach the store.
//! - Every operation returns the full current list so the shell can render
//!   from one envelope.
//! - A failed persistence write never blocks the in-memory mutation; it is
//!   logged and the envelope still reports success.

use log::warn;
use pocketlist_core::db::open_db;
use pocketlist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, load_store,
    ping as ping_inner, RemovedTask, SnapshotRepository, SnapshotResult, SqliteSnapshotRepository,
    Task, TaskListService, TaskStore,
};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

const NOT_INITIALIZED: &str = "task list not initialized; call init_task_list first";

static TASK_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static TASK_STORE: OnceLock<Mutex<TaskStore>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task record crossing the FFI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    /// Stable identity for UI diffing and undo round-trips.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Completion flag.
    pub done: bool,
}

/// Response envelope carrying the full current list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// The list after the operation, in user order.
    pub tasks: Vec<TaskView>,
    /// Human-readable diagnostics message.
    pub message: String,
}

impl TaskListResponse {
    fn success(tasks: Vec<TaskView>, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            tasks,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            tasks: Vec::new(),
            message: message.into(),
        }
    }
}

/// Response envelope for [`remove_task`]: the removed task and its original
/// index are echoed back so the shell can offer undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveTaskResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// The removed task, present on success.
    pub removed: Option<TaskView>,
    /// The index the task occupied, present on success.
    pub removed_index: Option<u32>,
    /// The list after the operation.
    pub tasks: Vec<TaskView>,
    /// Human-readable diagnostics message.
    pub message: String,
}

/// Shell-owned theme state. Pure UI concern: never persisted, never stored
/// in core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

/// Flips the theme mode for the shell.
///
/// # FFI contract
/// - Sync, pure, stateless; the shell owns the resulting value.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_theme_mode(mode: ThemeMode) -> ThemeMode {
    match mode {
        ThemeMode::Light => ThemeMode::Dark,
        ThemeMode::Dark => ThemeMode::Light,
    }
}

/// Opens the task database, loads the persisted snapshot and seeds the
/// process-global store.
///
/// # FFI contract
/// - Sync call; performs database open + migration + snapshot decode.
/// - Idempotent for the same `db_path`; a different path is rejected.
/// - Undecodable persisted data is reported in the envelope, never silently
///   discarded.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn init_task_list(db_path: String) -> TaskListResponse {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return TaskListResponse::failure("db_path cannot be empty");
    }
    let path = PathBuf::from(trimmed);

    if TASK_STORE.get().is_some() {
        if TASK_DB_PATH.get().is_some_and(|active| active != &path) {
            return TaskListResponse::failure(format!(
                "task list already initialized at `{}`; refusing to switch to `{}`",
                TASK_DB_PATH.get().map(|p| p.display().to_string()).unwrap_or_default(),
                path.display()
            ));
        }
        return match lock_store() {
            Ok(store) => {
                TaskListResponse::success(views(store.tasks()), "task list already initialized")
            }
            Err(message) => TaskListResponse::failure(message),
        };
    }

    let conn = match open_db(&path) {
        Ok(conn) => conn,
        Err(err) => {
            return TaskListResponse::failure(format!("failed to open task database: {err}"));
        }
    };
    let repo = match SqliteSnapshotRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => return TaskListResponse::failure(format!("{err}")),
    };
    let store = match load_store(&repo) {
        Ok(store) => store,
        Err(err) => {
            return TaskListResponse::failure(format!("failed to load task list: {err}"));
        }
    };

    let _ = TASK_DB_PATH.set(path);
    let _ = TASK_STORE.set(Mutex::new(store));

    match lock_store() {
        Ok(store) => TaskListResponse::success(views(store.tasks()), "task list ready"),
        Err(message) => TaskListResponse::failure(message),
    }
}

/// Returns the current list without mutating anything.
///
/// # FFI contract
/// - Sync call, in-memory read only. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_tasks() -> TaskListResponse {
    match lock_store() {
        Ok(store) => TaskListResponse::success(views(store.tasks()), ""),
        Err(message) => TaskListResponse::failure(message),
    }
}

/// Appends a task from raw input. Blank input is a defined no-op and still
/// reports success with the unchanged list.
///
/// # FFI contract
/// - Sync call; mirrors the list to storage on mutation. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn add_task(text: String) -> TaskListResponse {
    apply_list_op(ListOp::Add(text))
}

/// Flips the completion flag of the task at `index`.
///
/// # FFI contract
/// - Sync call; out-of-range index returns a failure envelope. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_task_done(index: u32) -> TaskListResponse {
    apply_list_op(ListOp::Toggle(index as usize))
}

/// Replaces the title of the task at `index`; blank input retains the
/// current title.
///
/// # FFI contract
/// - Sync call; out-of-range index returns a failure envelope. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn edit_task_title(index: u32, text: String) -> TaskListResponse {
    apply_list_op(ListOp::Edit(index as usize, text))
}

/// Re-inserts a task previously returned by [`remove_task`], clamped to the
/// current list bounds.
///
/// # FFI contract
/// - Sync call; accepts any index (clamped). Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn undo_remove_task(id: i64, title: String, done: bool, index: u32) -> TaskListResponse {
    apply_list_op(ListOp::UndoRemove(
        Task { id, title, done },
        index as usize,
    ))
}

/// Moves the task at `old_index` to end up at `new_index`.
///
/// # FFI contract
/// - Sync call; out-of-range indices return a failure envelope. Never
///   panics.
#[flutter_rust_bridge::frb(sync)]
pub fn reorder_tasks(old_index: u32, new_index: u32) -> TaskListResponse {
    apply_list_op(ListOp::Reorder(old_index as usize, new_index as usize))
}

/// Removes the task at `index`, echoing it back for the shell's undo offer.
///
/// # FFI contract
/// - Sync call; out-of-range index returns a failure envelope. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn remove_task(index: u32) -> RemoveTaskResponse {
    let index = index as usize;
    let mut store = match lock_store() {
        Ok(store) => store,
        Err(message) => return remove_failure(message, Vec::new()),
    };
    if index >= store.len() {
        let message = format!("index {index} out of range for list of {}", store.len());
        let tasks = views(store.tasks());
        return remove_failure(message, tasks);
    }

    let conn = checkout_connection();
    let removed = {
        let mut service = TaskListService::new(&mut *store, save_target(conn.as_ref()));
        service.remove(index)
    };

    RemoveTaskResponse {
        ok: true,
        removed: Some(view(&removed.task)),
        removed_index: Some(removed.index as u32),
        tasks: views(store.tasks()),
        message: String::new(),
    }
}

enum ListOp {
    Add(String),
    Toggle(usize),
    Edit(usize, String),
    UndoRemove(Task, usize),
    Reorder(usize, usize),
}

fn apply_list_op(op: ListOp) -> TaskListResponse {
    let mut store = match lock_store() {
        Ok(store) => store,
        Err(message) => return TaskListResponse::failure(message),
    };

    if let Some(message) = index_guard(&op, store.len()) {
        return TaskListResponse {
            ok: false,
            tasks: views(store.tasks()),
            message,
        };
    }

    let conn = checkout_connection();
    {
        let mut service = TaskListService::new(&mut *store, save_target(conn.as_ref()));
        match op {
            ListOp::Add(text) => {
                service.add(&text);
            }
            ListOp::Toggle(index) => {
                service.toggle_done(index);
            }
            ListOp::Edit(index, text) => {
                service.edit_title(index, &text);
            }
            ListOp::UndoRemove(task, index) => {
                service.undo_remove(RemovedTask { task, index });
            }
            ListOp::Reorder(old_index, new_index) => {
                service.reorder(old_index, new_index);
            }
        }
    }

    TaskListResponse::success(views(store.tasks()), "")
}

/// Screens index arguments against the current list so contract violations
/// surface as failure envelopes instead of store panics.
fn index_guard(op: &ListOp, len: usize) -> Option<String> {
    let out_of_range = |index: usize| format!("index {index} out of range for list of {len}");
    match op {
        ListOp::Toggle(index) | ListOp::Edit(index, _) => {
            (*index >= len).then(|| out_of_range(*index))
        }
        ListOp::Reorder(old_index, new_index) => (*old_index >= len)
            .then(|| out_of_range(*old_index))
            .or_else(|| (*new_index >= len).then(|| out_of_range(*new_index))),
        // Add has no index; undo clamps by contract.
        ListOp::Add(_) | ListOp::UndoRemove(_, _) => None,
    }
}

fn lock_store() -> Result<MutexGuard<'static, TaskStore>, String> {
    let lock = TASK_STORE.get().ok_or(NOT_INITIALIZED)?;
    lock.lock()
        .map_err(|_| "task store lock poisoned".to_string())
}

/// Opens the snapshot connection for one mutation round.
///
/// `None` means persistence is skipped this round: the failure is logged
/// here and the in-memory mutation proceeds regardless.
fn checkout_connection() -> Option<Connection> {
    let path = TASK_DB_PATH.get()?;
    match open_db(path) {
        Ok(conn) => Some(conn),
        Err(err) => {
            warn!("event=snapshot_save module=ffi status=error error_code=db_unavailable error={err}");
            None
        }
    }
}

fn save_target(conn: Option<&Connection>) -> SaveTarget<'_> {
    match conn {
        Some(conn) => match SqliteSnapshotRepository::try_new(conn) {
            Ok(repo) => SaveTarget::Db(repo),
            Err(err) => {
                warn!(
                    "event=snapshot_save module=ffi status=error error_code=repo_unavailable error={err}"
                );
                SaveTarget::Skip
            }
        },
        None => SaveTarget::Skip,
    }
}

/// Repository adapter for one mutation round: either the real SQLite slot
/// or a skip marker for the round whose connection failed (already logged).
enum SaveTarget<'conn> {
    Db(SqliteSnapshotRepository<'conn>),
    Skip,
}

impl SnapshotRepository for SaveTarget<'_> {
    fn save_tasks(&self, tasks: &[Task]) -> SnapshotResult<()> {
        match self {
            Self::Db(repo) => repo.save_tasks(tasks),
            Self::Skip => Ok(()),
        }
    }

    fn load_tasks(&self) -> SnapshotResult<Vec<Task>> {
        match self {
            Self::Db(repo) => repo.load_tasks(),
            Self::Skip => Ok(Vec::new()),
        }
    }
}

fn view(task: &Task) -> TaskView {
    TaskView {
        id: task.id,
        title: task.title.clone(),
        done: task.done,
    }
}

fn views(tasks: &[Task]) -> Vec<TaskView> {
    tasks.iter().map(view).collect()
}

fn remove_failure(message: impl Into<String>, tasks: Vec<TaskView>) -> RemoveTaskResponse {
    RemoveTaskResponse {
        ok: false,
        removed: None,
        removed_index: None,
        tasks,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::{index_guard, toggle_theme_mode, ListOp, ThemeMode};

    #[test]
    fn theme_toggle_flips_both_ways() {
        assert_eq!(toggle_theme_mode(ThemeMode::Light), ThemeMode::Dark);
        assert_eq!(toggle_theme_mode(ThemeMode::Dark), ThemeMode::Light);
    }

    #[test]
    fn index_guard_screens_store_contract_violations() {
        assert!(index_guard(&ListOp::Toggle(2), 2).is_some());
        assert!(index_guard(&ListOp::Toggle(1), 2).is_none());
        assert!(index_guard(&ListOp::Reorder(0, 3), 3).is_some());
        assert!(index_guard(&ListOp::Add("x".into()), 0).is_none());
    }
}
