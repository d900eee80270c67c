//! Process-wide application context.
//!
//! # Responsibility
//! - Own the durable store, the reference catalog and the clock.
//! - Hold the theme preference: read once at construction, written on every toggle.
//! - Guard page renders so a failing page yields a generic notice.
//!
//! # Invariants
//! - After one render failure the session is failed; later renders return the
//!   notice without running the page.

use crate::model::catalog::Catalog;
use crate::model::theme::Theme;
use crate::repo::annotation_repo::AnnotationStore;
use crate::repo::channel_repo::ChannelStore;
use crate::schedule::{Clock, DEFAULT_QUIET_MS};
use crate::storage::{KvStore, StorageBackend, StorageKey};
use log::{error, info};
use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

/// Generic notice shown in place of a failed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureNotice {
    pub title: &'static str,
    pub detail: &'static str,
}

impl FailureNotice {
    pub const GENERIC: Self = Self {
        title: "Something went wrong",
        detail: "Please refresh the page.",
    };
}

/// Result of a guarded page render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome<R> {
    Rendered(R),
    Failed(FailureNotice),
}

impl<R> RenderOutcome<R> {
    pub fn rendered(self) -> Option<R> {
        match self {
            Self::Rendered(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

pub struct AppContext<B: StorageBackend> {
    kv: KvStore<B>,
    catalog: Catalog,
    clock: Rc<dyn Clock>,
    search_debounce_ms: u64,
    theme: Cell<Theme>,
    session_failed: Cell<bool>,
}

impl<B: StorageBackend> AppContext<B> {
    /// Builds the context and restores the persisted theme (default dark).
    pub fn new(backend: B, catalog: Catalog, clock: Rc<dyn Clock>) -> Self {
        let kv = KvStore::new(backend);
        let theme = kv
            .get_text(&StorageKey::Theme)
            .as_deref()
            .and_then(Theme::from_stored)
            .unwrap_or_default();
        info!(
            "event=context_init module=context status=ok theme={} articles={} tools={} steps={} channels={}",
            theme.as_str(),
            catalog.articles().len(),
            catalog.tools().len(),
            catalog.path().len(),
            catalog.channels().len()
        );
        Self {
            kv,
            catalog,
            clock,
            search_debounce_ms: DEFAULT_QUIET_MS,
            theme: Cell::new(theme),
            session_failed: Cell::new(false),
        }
    }

    /// Overrides the search debounce interval (minimum 1ms).
    pub fn with_search_debounce_ms(mut self, quiet_ms: u64) -> Self {
        self.search_debounce_ms = quiet_ms.max(1);
        self
    }

    pub fn kv(&self) -> &KvStore<B> {
        &self.kv
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    pub fn search_debounce_ms(&self) -> u64 {
        self.search_debounce_ms
    }

    pub fn annotations(&self) -> AnnotationStore<'_, B> {
        AnnotationStore::new(&self.kv)
    }

    pub fn channels(&self) -> ChannelStore<'_, B> {
        ChannelStore::new(&self.kv, &self.catalog, self.clock.as_ref())
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    /// Flips the theme and persists the new value.
    pub fn toggle_theme(&self) -> Theme {
        let next = self.theme.get().toggled();
        self.theme.set(next);
        let persisted = self.kv.set_text(&StorageKey::Theme, next.as_str());
        info!(
            "event=theme_toggle module=context status=ok theme={} persisted={}",
            next.as_str(),
            persisted
        );
        next
    }

    pub fn is_session_failed(&self) -> bool {
        self.session_failed.get()
    }

    /// Runs `render` for `page`, replacing a panic with the generic failure notice.
    pub fn render<R>(&self, page: &'static str, render: impl FnOnce() -> R) -> RenderOutcome<R> {
        if self.session_failed.get() {
            return RenderOutcome::Failed(FailureNotice::GENERIC);
        }

        match catch_unwind(AssertUnwindSafe(render)) {
            Ok(value) => RenderOutcome::Rendered(value),
            Err(_) => {
                self.session_failed.set(true);
                error!("event=render_failed module=context status=error page={page}");
                RenderOutcome::Failed(FailureNotice::GENERIC)
            }
        }
    }
}
