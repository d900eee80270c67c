//! Typed JSON key/value store over a raw [`StorageBackend`].
//!
//! # Responsibility
//! - Encode/decode values as JSON at the storage boundary.
//! - Offer fallible (`try_get`, `try_set`) and absorbing (`get`, `set`) entry points.
//!
//! # Invariants
//! - `get` never fails: an absent key, a backend failure or a malformed value all
//!   resolve to the caller's fallback, which is returned as-is.
//! - `set` never fails: backend and encoding failures are logged and dropped, with
//!   no retry.
//! - Logged events carry the key kind and byte counts only, never values.

use super::{StorageBackend, StorageError, StorageKey, StorageResult};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Durable key/value store with JSON encoding.
pub struct KvStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> KvStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Reads and decodes the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    ///
    /// # Errors
    /// - Backend failures are returned unchanged.
    /// - [`StorageError::Decode`] when the stored text is not valid JSON for `T`.
    pub fn try_get<T: DeserializeOwned>(&self, key: &StorageKey) -> StorageResult<Option<T>> {
        let Some(raw) = self.backend.read_raw(key)? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw).map_err(|source| StorageError::Decode {
            key: key.render(),
            source,
        })?;
        Ok(Some(value))
    }

    /// Reads `key`, resolving absence and every failure to `fallback`.
    pub fn get<T: DeserializeOwned>(&self, key: &StorageKey, fallback: T) -> T {
        match self.try_get(key) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(err) => {
                warn!(
                    "event=storage_read module=storage status=fallback key_kind={} error_code={} error={}",
                    key.kind(),
                    err.code(),
                    err
                );
                fallback
            }
        }
    }

    /// Reads the stored text under `key` without JSON decoding; failures read as absent.
    ///
    /// Used for values the site has always stored as bare strings (the theme).
    pub fn get_text(&self, key: &StorageKey) -> Option<String> {
        match self.backend.read_raw(key) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event=storage_read module=storage status=fallback key_kind={} error_code={} error={}",
                    key.kind(),
                    err.code(),
                    err
                );
                None
            }
        }
    }

    /// Encodes and writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// - [`StorageError::Encode`] when `value` cannot be serialized.
    /// - Backend failures (unavailable, quota, database) are returned unchanged.
    pub fn try_set<T: Serialize + ?Sized>(&self, key: &StorageKey, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.render(),
            source,
        })?;
        self.try_set_text(key, &raw)
    }

    /// Writes `text` under `key` verbatim, without JSON encoding.
    ///
    /// # Errors
    /// - Backend failures (unavailable, quota, database) are returned unchanged.
    pub fn try_set_text(&self, key: &StorageKey, text: &str) -> StorageResult<()> {
        self.backend.write_raw(key, text)?;
        debug!(
            "event=storage_write module=storage status=ok key_kind={} bytes={}",
            key.kind(),
            text.len()
        );
        Ok(())
    }

    /// Writes `value` under `key`, absorbing failures.
    ///
    /// Returns whether the write reached the backend.
    pub fn set<T: Serialize + ?Sized>(&self, key: &StorageKey, value: &T) -> bool {
        match self.try_set(key, value) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=storage_write module=storage status=dropped key_kind={} error_code={} error={}",
                    key.kind(),
                    err.code(),
                    err
                );
                false
            }
        }
    }

    /// Writes `text` under `key` verbatim, absorbing failures.
    pub fn set_text(&self, key: &StorageKey, text: &str) -> bool {
        match self.try_set_text(key, text) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=storage_write module=storage status=dropped key_kind={} error_code={} error={}",
                    key.kind(),
                    err.code(),
                    err
                );
                false
            }
        }
    }

    /// Returns whether a raw value exists for `key`; failures read as absent.
    pub fn contains(&self, key: &StorageKey) -> bool {
        matches!(self.backend.read_raw(key), Ok(Some(_)))
    }

    /// Removes `key`, absorbing failures. Returns whether the removal reached the backend.
    pub fn remove(&self, key: &StorageKey) -> bool {
        match self.backend.remove(key) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=storage_write module=storage status=dropped op=remove key_kind={} error_code={} error={}",
                    key.kind(),
                    err.code(),
                    err
                );
                false
            }
        }
    }
}
