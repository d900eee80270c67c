//! Page-level controllers and the process-wide application context.
//!
//! # Responsibility
//! - Restore persisted state when a page mounts, before its first render.
//! - Route user events to the stores in dispatch order.
//! - Own transient query state and its debounce timer for the page lifetime.
//!
//! # Invariants
//! - Unmounting a page cancels its pending timers; no update lands afterwards.
//! - Catalog lookup misses are excluded from views, never surfaced as failures.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod app_context;
pub mod articles_page;
pub mod community_page;
pub mod path_page;
pub mod search_input;
pub mod tools_page;

pub use app_context::{AppContext, FailureNotice, RenderOutcome};
pub use articles_page::{ArticleCard, ArticlesPage};
pub use community_page::{CommunityPage, LOCAL_AUTHOR};
pub use path_page::{PathPage, PathProgress, PathStepRow};
pub use search_input::SearchInput;
pub use tools_page::ToolsPage;

/// Errors returned by page controller operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// ID is not present in the relevant catalog collection.
    UnknownItem(String),
    /// Channel name is not declared by the catalog.
    UnknownChannel(String),
    /// Catalog declares no channels to post into.
    NoActiveChannel,
    /// Message text is blank after trimming.
    EmptyMessage,
}

impl Display for PageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownItem(id) => write!(f, "catalog item not found: {id}"),
            Self::UnknownChannel(name) => write!(f, "channel not found: {name}"),
            Self::NoActiveChannel => write!(f, "no channel is selected"),
            Self::EmptyMessage => write!(f, "message text must not be blank"),
        }
    }
}

impl Error for PageError {}
