//! Durable key/value storage boundary.
//!
//! # Responsibility
//! - Own the serialization boundary between typed core state and raw storage.
//! - Absorb storage failures so they never reach page controllers.
//!
//! # Invariants
//! - Keys are built only through [`StorageKey`]; raw string keys are never composed ad hoc.
//! - A key always holds the latest value written for it (last write wins).
//! - Fallible `try_*` operations report failures; `get`/`set` resolve them to a
//!   fallback or a logged no-op.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod backend;
pub mod key;
pub mod kv;

pub use backend::{MemoryBackend, SqliteBackend, StorageBackend};
pub use key::{ChannelName, Namespace, StorageKey, StorageKeyError};
pub use kv::KvStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure at the storage boundary.
#[derive(Debug)]
pub enum StorageError {
    /// Storage is disabled or otherwise unreachable.
    Unavailable(String),
    /// Write would exceed the backend byte quota.
    QuotaExceeded {
        key: String,
        needed_bytes: usize,
        limit_bytes: usize,
    },
    /// SQLite call failed.
    Sqlite(rusqlite::Error),
    /// Database file was written by a newer schema than this binary knows.
    SchemaTooNew {
        db_version: u32,
        latest_supported: u32,
    },
    /// Value could not be serialized to JSON.
    Encode {
        key: String,
        source: serde_json::Error,
    },
    /// Stored text is not a valid JSON encoding of the expected type.
    Decode {
        key: String,
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "storage_unavailable",
            Self::QuotaExceeded { .. } => "quota_exceeded",
            Self::Sqlite(_) => "db_error",
            Self::SchemaTooNew { .. } => "schema_too_new",
            Self::Encode { .. } => "encode_failed",
            Self::Decode { .. } => "decode_failed",
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "local storage unavailable: {message}"),
            Self::QuotaExceeded {
                key,
                needed_bytes,
                limit_bytes,
            } => write!(
                f,
                "writing `{key}` needs {needed_bytes} bytes, quota is {limit_bytes} bytes"
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew {
                db_version,
                latest_supported,
            } => write!(
                f,
                "local storage schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Encode { key, source } => write!(f, "cannot encode value for `{key}`: {source}"),
            Self::Decode { key, source } => {
                write!(f, "stored value for `{key}` is malformed: {source}")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Encode { source, .. } | Self::Decode { source, .. } => Some(source),
            Self::Unavailable(_) | Self::QuotaExceeded { .. } | Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
