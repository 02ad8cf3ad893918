//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the save/load contract the rest of the core depends on.
//! - Isolate SQLite details from store/service orchestration.
//!
//! # Invariants
//! - Read paths return semantic errors for invalid persisted state instead
//!   of masking it.
//! - An absent snapshot slot is first-run, not an error.

pub mod snapshot_repo;
