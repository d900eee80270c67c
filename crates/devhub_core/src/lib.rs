//! Local-first state and derived-view core for the DevHub site.
//! This crate is the single source of truth for persisted user state and view invariants.

pub mod config;
pub mod db;
pub mod health;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;
pub mod storage;
pub mod view;

pub use config::CoreConfig;
pub use health::{report_health, HealthError, HealthProbe};
pub use logging::{
    default_log_level, flush_logging, init_logging, init_logging_from_config, logging_status,
    LoggingError,
};
pub use model::catalog::{
    Article, Catalog, CatalogData, CatalogEntry, CatalogError, Channel, PathStep, Tool,
};
pub use model::message::Message;
pub use model::theme::Theme;
pub use repo::annotation_repo::{AnnotationSet, AnnotationStore};
pub use repo::channel_repo::{ChannelLog, ChannelStore};
pub use schedule::{Clock, DebounceHandle, Debouncer, ManualClock, SystemClock};
pub use service::{
    AppContext, ArticleCard, ArticlesPage, CommunityPage, FailureNotice, PageError, PathPage,
    PathProgress, PathStepRow, RenderOutcome, ToolsPage,
};
pub use storage::{
    ChannelName, KvStore, MemoryBackend, Namespace, SqliteBackend, StorageBackend, StorageError,
    StorageKey, StorageResult,
};
pub use view::{project, CategoryFilter, QueryState, SortKey};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
