//! Task-list snapshot persistence: contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the full task list as encoded text under one fixed slot.
//! - Reconstruct the list from that slot at startup.
//!
//! # Invariants
//! - `load_tasks` after `save_tasks` reproduces the saved list exactly.
//! - Saving overwrites the single slot; the table never grows with use.
//! - An absent slot decodes to the empty list (first run).

use crate::codec::{decode_tasks, encode_tasks, CodecError};
use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::task::Task;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key of the task-list slot.
pub const TASKS_SLOT: &str = "tasks";

const SLOT_TABLE: &str = "kv_slots";
const SLOT_COLUMNS: &[&str] = &["slot", "value", "updated_at"];

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Errors from snapshot persistence operations.
#[derive(Debug)]
pub enum SnapshotError {
    /// Persisted text exists but cannot be decoded into a valid list.
    Codec(CodecError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Codec(err) => write!(f, "invalid persisted task list: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "snapshot repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "snapshot repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "snapshot repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Codec(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<CodecError> for SnapshotError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

impl From<DbError> for SnapshotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SnapshotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence contract for the task-list snapshot.
///
/// The in-memory list is the source of truth; implementations mirror it and
/// hand it back at startup.
pub trait SnapshotRepository {
    /// Writes the full list, replacing any prior snapshot.
    fn save_tasks(&self, tasks: &[Task]) -> SnapshotResult<()>;

    /// Reads the snapshot. Absent slot returns the empty list; present but
    /// undecodable data is an error.
    fn load_tasks(&self) -> SnapshotResult<Vec<Task>>;
}

/// SQLite-backed snapshot repository over the `kv_slots` table.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Wraps a migrated connection after verifying its schema.
    ///
    /// # Errors
    /// - [`SnapshotError::UninitializedConnection`] when `PRAGMA
    ///   user_version` does not match the latest migration.
    /// - [`SnapshotError::MissingRequiredTable`] /
    ///   [`SnapshotError::MissingRequiredColumn`] when the slot table shape
    ///   is wrong despite the version stamp.
    pub fn try_new(conn: &'conn Connection) -> SnapshotResult<Self> {
        verify_connection(conn)?;
        Ok(Self { conn })
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn save_tasks(&self, tasks: &[Task]) -> SnapshotResult<()> {
        let encoded = encode_tasks(tasks)?;
        self.conn.execute(
            "INSERT INTO kv_slots (slot, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(slot) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![TASKS_SLOT, encoded],
        )?;
        Ok(())
    }

    fn load_tasks(&self) -> SnapshotResult<Vec<Task>> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE slot = ?1;",
                [TASKS_SLOT],
                |row| row.get(0),
            )
            .optional()?;

        match stored {
            Some(text) => Ok(decode_tasks(&text)?),
            None => Ok(Vec::new()),
        }
    }
}

fn verify_connection(conn: &Connection) -> SnapshotResult<()> {
    let actual_version =
        conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(SnapshotError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [SLOT_TABLE],
            |row| row.get(0),
        )
        .optional()?;
    if table_exists.is_none() {
        return Err(SnapshotError::MissingRequiredTable(SLOT_TABLE));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let mut rows = stmt.query([SLOT_TABLE])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>(0)?);
    }
    for column in SLOT_COLUMNS.iter().copied() {
        if !present.iter().any(|name| name.as_str() == column) {
            return Err(SnapshotError::MissingRequiredColumn {
                table: SLOT_TABLE,
                column,
            });
        }
    }

    Ok(())
}
