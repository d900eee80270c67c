//! Channel message record.
//!
//! # Invariants
//! - `id` is assigned once by the generator and never reused.
//! - Serialized field names (`id`, `author`, `text`, `ts`) are part of the
//!   persisted key space format and must not change.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One chat message in a channel log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub author: String,
    pub text: String,
    /// Unix epoch milliseconds.
    #[serde(rename = "ts")]
    pub timestamp_ms: i64,
}

impl Message {
    /// Creates a message with a freshly generated random ID.
    pub fn new(author: impl Into<String>, text: impl Into<String>, timestamp_ms: i64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), author, text, timestamp_ms)
    }

    /// Creates a message with a caller-provided ID (seed data, imports).
    pub fn with_id(
        id: impl Into<String>,
        author: impl Into<String>,
        text: impl Into<String>,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            text: text.into(),
            timestamp_ms,
        }
    }
}
