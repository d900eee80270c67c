//! Debounced search box state shared by searchable pages.

use crate::schedule::{DebounceHandle, Debouncer};
use crate::view::QueryState;

/// Query state plus the timer that moves `raw_input` into `debounced_query`.
#[derive(Debug, Clone)]
pub struct SearchInput {
    query: QueryState,
    debouncer: Debouncer<String>,
    pending: Option<DebounceHandle>,
}

impl SearchInput {
    pub fn new(query: QueryState, quiet_ms: u64) -> Self {
        Self {
            query,
            debouncer: Debouncer::new(quiet_ms),
            pending: None,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut QueryState {
        &mut self.query
    }

    /// Records typed text and restarts the quiet interval.
    ///
    /// Typing back to the text already applied cancels the pending update.
    pub fn type_text(&mut self, raw: impl Into<String>, now_ms: i64) {
        let raw = raw.into();
        self.query.raw_input = raw.clone();
        if raw == self.query.debounced_query {
            if let Some(handle) = self.pending.take() {
                self.debouncer.cancel(handle);
            }
            return;
        }
        self.pending = self.debouncer.schedule(raw, now_ms);
    }

    /// Applies the pending text if it is due. Returns whether the query changed.
    pub fn poll(&mut self, now_ms: i64) -> bool {
        let Some(text) = self.debouncer.fire_due(now_ms) else {
            return false;
        };
        self.pending = None;
        if text == self.query.debounced_query {
            return false;
        }
        self.query.debounced_query = text;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Cancels the pending update; later polls and typing have no effect.
    pub fn teardown(&mut self) {
        self.pending = None;
        self.debouncer.teardown();
    }
}
