//! SQLite bootstrap for the durable local storage table.
//!
//! # Responsibility
//! - Open and configure SQLite connections backing `SqliteBackend`.
//! - Bring the `local_storage` schema up to date before any key is touched.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Failures surface as [`crate::storage::StorageError`]; there is no separate
//!   database error type.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
