//! Raw string storage backends.
//!
//! # Responsibility
//! - Store and fetch raw string values by rendered [`StorageKey`].
//! - Report unavailability and quota failures as typed errors.
//!
//! # Invariants
//! - Backends are single-writer; concurrent writers from other processes may
//!   clobber each other (last write wins) and are not detected.
//! - `write_raw` replaces the whole value for a key; there is no partial update.

use super::{StorageError, StorageKey, StorageResult};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;

/// Raw string storage contract used by [`super::KvStore`].
pub trait StorageBackend {
    fn read_raw(&self, key: &StorageKey) -> StorageResult<Option<String>>;
    fn write_raw(&self, key: &StorageKey, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &StorageKey) -> StorageResult<()>;
}

/// Process-local backend.
///
/// Optionally enforces a byte quota over the sum of key and value lengths, and
/// can be constructed disabled to model storage that refuses every call.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RefCell<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
    disabled: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that rejects writes pushing total usage above `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Creates a backend that fails every read and write.
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Stores a raw value without JSON encoding, bypassing quota checks.
    ///
    /// Used to seed pre-existing or corrupt state.
    pub fn insert_raw(&self, key: &StorageKey, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.render(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn ensure_enabled(&self) -> StorageResult<()> {
        if self.disabled {
            return Err(StorageError::Unavailable(
                "memory backend is disabled".to_string(),
            ));
        }
        Ok(())
    }

    fn usage_without(&self, raw_key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(key, _)| key.as_str() != raw_key)
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl StorageBackend for MemoryBackend {
    fn read_raw(&self, key: &StorageKey) -> StorageResult<Option<String>> {
        self.ensure_enabled()?;
        Ok(self.entries.borrow().get(&key.render()).cloned())
    }

    fn write_raw(&self, key: &StorageKey, value: &str) -> StorageResult<()> {
        self.ensure_enabled()?;
        let raw_key = key.render();
        if let Some(limit_bytes) = self.quota_bytes {
            let needed_bytes = self.usage_without(&raw_key) + raw_key.len() + value.len();
            if needed_bytes > limit_bytes {
                return Err(StorageError::QuotaExceeded {
                    key: raw_key,
                    needed_bytes,
                    limit_bytes,
                });
            }
        }
        self.entries.borrow_mut().insert(raw_key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: &StorageKey) -> StorageResult<()> {
        self.ensure_enabled()?;
        self.entries.borrow_mut().remove(&key.render());
        Ok(())
    }
}

/// SQLite-backed durable backend; the store of record across restarts.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps a connection already returned by [`crate::db::open_db`].
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Returns stored rendered keys in ascending order.
    pub fn keys(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM local_storage ORDER BY key ASC;")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut keys = Vec::new();
        for key in rows {
            keys.push(key?);
        }
        Ok(keys)
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

impl StorageBackend for SqliteBackend {
    fn read_raw(&self, key: &StorageKey) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1;",
                [key.render()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_raw(&self, key: &StorageKey, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key.render(), value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &StorageKey) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1;", [key.render()])?;
        Ok(())
    }
}

impl<T: StorageBackend + ?Sized> StorageBackend for &T {
    fn read_raw(&self, key: &StorageKey) -> StorageResult<Option<String>> {
        (**self).read_raw(key)
    }

    fn write_raw(&self, key: &StorageKey, value: &str) -> StorageResult<()> {
        (**self).write_raw(key, value)
    }

    fn remove(&self, key: &StorageKey) -> StorageResult<()> {
        (**self).remove(key)
    }
}

impl<T: StorageBackend + ?Sized> StorageBackend for Box<T> {
    fn read_raw(&self, key: &StorageKey) -> StorageResult<Option<String>> {
        (**self).read_raw(key)
    }

    fn write_raw(&self, key: &StorageKey, value: &str) -> StorageResult<()> {
        (**self).write_raw(key, value)
    }

    fn remove(&self, key: &StorageKey) -> StorageResult<()> {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryBackend, SqliteBackend, StorageBackend};
    use crate::storage::{StorageError, StorageKey};

    #[test]
    fn memory_quota_counts_replaced_value_once() {
        let backend = MemoryBackend::with_quota(16);
        // "theme" (5) + 6 = 11 bytes
        backend.write_raw(&StorageKey::Theme, "\"dark\"").unwrap();
        backend.write_raw(&StorageKey::Theme, "\"light\"").unwrap();

        let err = backend
            .write_raw(&StorageKey::Theme, "\"far-too-long\"")
            .unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit_bytes: 16, .. }));
        assert_eq!(
            backend.read_raw(&StorageKey::Theme).unwrap().as_deref(),
            Some("\"light\"")
        );
    }

    #[test]
    fn disabled_memory_backend_fails_every_call() {
        let backend = MemoryBackend::disabled();
        assert!(matches!(
            backend.read_raw(&StorageKey::Theme),
            Err(StorageError::Unavailable(_))
        ));
        assert!(backend.write_raw(&StorageKey::Theme, "1").is_err());
        assert!(backend.remove(&StorageKey::Theme).is_err());
    }

    #[test]
    fn sqlite_upsert_replaces_value() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        backend.write_raw(&StorageKey::Theme, "\"dark\"").unwrap();
        backend.write_raw(&StorageKey::Theme, "\"light\"").unwrap();

        assert_eq!(
            backend.read_raw(&StorageKey::Theme).unwrap().as_deref(),
            Some("\"light\"")
        );
        assert_eq!(backend.keys().unwrap(), vec!["theme".to_string()]);

        backend.remove(&StorageKey::Theme).unwrap();
        assert_eq!(backend.read_raw(&StorageKey::Theme).unwrap(), None);
    }
}
