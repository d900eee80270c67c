//! Ordered schema steps for the local storage database.
//!
//! # Invariants
//! - Step versions are strictly increasing; `user_version` records the last applied one.
//! - Steps never rewrite stored keys or values, so persisted state survives upgrades.

use crate::storage::{StorageError, StorageResult};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    sql: include_str!("0001_local_storage.sql"),
}];

/// Schema version this binary writes.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Applies every step newer than the database's `user_version` in one transaction.
///
/// # Errors
/// - [`StorageError::SchemaTooNew`] when the file was written by a newer binary.
/// - [`StorageError::Sqlite`] when a step fails; nothing is applied in that case.
pub fn apply_migrations(conn: &mut Connection) -> StorageResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();
    if found > latest {
        return Err(StorageError::SchemaTooNew {
            db_version: found,
            latest_supported: latest,
        });
    }

    let pending = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > found)
        .collect::<Vec<_>>();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={} steps={}",
        found,
        latest,
        pending.len()
    );
    Ok(())
}
