//! Task domain model.
//!
//! # Responsibility
//! - Define the single persisted record of the application.
//!
//! # Invariants
//! - `id` is stable for the lifetime of the task and never reused within a
//!   list.
//! - The persisted form has exactly the three fields below; decoding rejects
//!   anything else.

use serde::{Deserialize, Serialize};

/// Stable identifier for a task.
///
/// Derived from epoch milliseconds at creation time, bumped to stay strictly
/// increasing within one store. Kept as a type alias to make semantic intent
/// explicit in signatures.
pub type TaskId = i64;

/// A single to-do item: identity, display title, completion flag.
///
/// The serialized shape is the wire contract of the snapshot slot, so the
/// struct deliberately carries nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Task {
    /// Stable identity used for UI diffing and undo re-insertion.
    pub id: TaskId,
    /// Display text. Non-blank at rest; blankness is screened at the
    /// add/edit boundary, not here.
    pub title: String,
    /// Completion flag. New tasks start unfinished.
    pub done: bool,
}

impl Task {
    /// Creates an unfinished task with the given identity and title.
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            done: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Task;

    #[test]
    fn new_task_starts_unfinished() {
        let task = Task::new(42, "water plants");
        assert_eq!(task.id, 42);
        assert_eq!(task.title, "water plants");
        assert!(!task.done);
    }
}
