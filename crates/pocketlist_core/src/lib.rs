//! Core domain logic for PocketList.
//! This crate is the single source of truth for task-list invariants.

pub mod codec;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use codec::{decode_tasks, encode_tasks, CodecError, CodecResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId};
pub use repo::snapshot_repo::{
    SnapshotError, SnapshotRepository, SnapshotResult, SqliteSnapshotRepository, TASKS_SLOT,
};
pub use service::list_service::{load_store, TaskListService};
pub use store::task_store::{RemovedTask, TaskStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
