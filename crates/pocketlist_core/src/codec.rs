//! Snapshot codec for the persisted task list.
//!
//! # Responsibility
//! - Encode the full list to the JSON text stored in the snapshot slot.
//! - Decode persisted text back into a list, rejecting invalid state.
//!
//! # Invariants
//! - `decode_tasks(encode_tasks(list)) == list` for any valid list,
//!   including the empty one, preserving id, title, done and order.
//! - Decoding is strict: unknown or missing record fields and duplicate ids
//!   are errors, never silently repaired.
//!
//! Blank titles are accepted on decode: the at-rest invariant is enforced at
//! the add/edit boundary, not retroactively against old snapshots.

use crate::model::task::{Task, TaskId};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CodecResult<T> = Result<T, CodecError>;

/// Errors from snapshot encoding/decoding.
#[derive(Debug)]
pub enum CodecError {
    /// Malformed JSON or a record that does not match the three-field shape.
    Json(serde_json::Error),
    /// Two records share one id; identity would be ambiguous.
    DuplicateId(TaskId),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "duplicate task id in snapshot: {id}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Encodes the list as a JSON array of three-field records in list order.
pub fn encode_tasks(tasks: &[Task]) -> CodecResult<String> {
    Ok(serde_json::to_string(tasks)?)
}

/// Decodes snapshot text produced by [`encode_tasks`].
///
/// # Errors
/// - [`CodecError::Json`] on malformed JSON or records with unknown,
///   missing, or mistyped fields.
/// - [`CodecError::DuplicateId`] when two records carry the same id.
pub fn decode_tasks(text: &str) -> CodecResult<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(text)?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id) {
            return Err(CodecError::DuplicateId(task.id));
        }
    }

    Ok(tasks)
}
