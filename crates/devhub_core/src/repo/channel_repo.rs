//! Per-channel message logs.
//!
//! # Responsibility
//! - Load a channel's log, falling back to the catalog seed messages.
//! - Append locally authored messages and persist the full log per channel.
//!
//! # Invariants
//! - Logs are append-only and kept in insertion order.
//! - Appended timestamps never go below the previous last timestamp, so insertion
//!   order and timestamp order agree.
//! - Seed messages are not written until the first append on that channel.
//! - No length cap and no compaction.

use crate::model::catalog::Catalog;
use crate::model::message::Message;
use crate::schedule::Clock;
use crate::storage::{ChannelName, KvStore, StorageBackend, StorageKey};
use log::{debug, info};

/// In-memory message sequence for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLog {
    channel: ChannelName,
    messages: Vec<Message>,
}

impl ChannelLog {
    pub fn channel(&self) -> &ChannelName {
        &self.channel
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    fn last_timestamp_ms(&self) -> Option<i64> {
        self.messages.iter().map(|m| m.timestamp_ms).max()
    }
}

/// Channel log store backed by the durable key/value store.
pub struct ChannelStore<'a, B: StorageBackend> {
    kv: &'a KvStore<B>,
    catalog: &'a Catalog,
    clock: &'a dyn Clock,
}

impl<'a, B: StorageBackend> ChannelStore<'a, B> {
    pub fn new(kv: &'a KvStore<B>, catalog: &'a Catalog, clock: &'a dyn Clock) -> Self {
        Self { kv, catalog, clock }
    }

    /// Loads the persisted log for `channel`, or its seed messages when none exists.
    pub fn load(&self, channel: &ChannelName) -> ChannelLog {
        let seeds = self.catalog.seed_messages(channel.as_str()).to_vec();
        let messages = self.kv.get(&StorageKey::channel_log(channel), seeds);
        debug!(
            "event=channel_load module=channel status=ok messages={}",
            messages.len()
        );
        ChannelLog {
            channel: channel.clone(),
            messages,
        }
    }

    /// Appends a new message to `log` and persists the full log.
    ///
    /// The message receives a random ID and the current time, clamped so it is
    /// never earlier than the log's latest message.
    pub fn append(
        &self,
        log: &mut ChannelLog,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Message {
        let now_ms = self.clock.now_ms();
        let timestamp_ms = log
            .last_timestamp_ms()
            .map_or(now_ms, |last| now_ms.max(last));
        let message = Message::new(author, text, timestamp_ms);
        log.messages.push(message.clone());

        let persisted = self
            .kv
            .set(&StorageKey::channel_log(&log.channel), &log.messages);
        info!(
            "event=channel_append module=channel status=ok messages={} text_chars={} persisted={}",
            log.messages.len(),
            message.text.chars().count(),
            persisted
        );
        message
    }

    /// Loads `channel`, appends one message and persists the result.
    pub fn append_to(
        &self,
        channel: &ChannelName,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Message {
        let mut log = self.load(channel);
        self.append(&mut log, author, text)
    }
}
