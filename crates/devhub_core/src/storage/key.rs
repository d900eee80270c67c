//! Structured storage keys.
//!
//! # Invariants
//! - Rendered key strings are stable across releases; persisted data depends on them.
//! - `Namespace` never contains `:` or uppercase letters, so `annotations:<ns>` cannot
//!   collide with `chat:<channel>`, `theme` or the camel-case keys of built-in namespaces.
//! - Built-in namespaces keep the keys the site has always used (`savedBlogs`,
//!   `pathProgress`).

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static NAMESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("valid namespace regex"));

const THEME_KEY: &str = "theme";
const ANNOTATIONS_PREFIX: &str = "annotations:";
const CHANNEL_PREFIX: &str = "chat:";
const SAVED_ARTICLES_KEY: &str = "savedBlogs";
const PATH_PROGRESS_KEY: &str = "pathProgress";

/// Namespace holding bookmarked article IDs.
pub const SAVED_ARTICLES: &str = "saved-articles";
/// Namespace holding completed learning-path step IDs.
pub const PATH_PROGRESS: &str = "path-progress";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageKeyError {
    EmptyNamespace,
    InvalidNamespace(String),
    EmptyChannel,
}

impl Display for StorageKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNamespace => write!(f, "annotation namespace must not be empty"),
            Self::InvalidNamespace(value) => write!(
                f,
                "annotation namespace `{value}` must match [a-z0-9][a-z0-9-]*"
            ),
            Self::EmptyChannel => write!(f, "channel name must not be empty"),
        }
    }
}

impl Error for StorageKeyError {}

/// Validated annotation namespace (for example `saved-articles`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(value: impl Into<String>) -> Result<Self, StorageKeyError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(StorageKeyError::EmptyNamespace);
        }
        if !NAMESPACE_RE.is_match(trimmed) {
            return Err(StorageKeyError::InvalidNamespace(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn saved_articles() -> Self {
        Self(SAVED_ARTICLES.to_string())
    }

    pub fn path_progress() -> Self {
        Self(PATH_PROGRESS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Channel name as declared by the catalog (for example `#general`).
///
/// Compared exactly; no case folding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelName(String);

impl ChannelName {
    pub fn new(value: impl Into<String>) -> Result<Self, StorageKeyError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(StorageKeyError::EmptyChannel);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ChannelName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One slot in the local storage key space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Process-wide theme preference.
    Theme,
    /// Annotation set for one namespace.
    Annotations(Namespace),
    /// Message log for one channel.
    ChannelLog(ChannelName),
}

impl StorageKey {
    pub fn annotations(namespace: &Namespace) -> Self {
        Self::Annotations(namespace.clone())
    }

    pub fn channel_log(channel: &ChannelName) -> Self {
        Self::ChannelLog(channel.clone())
    }

    /// Renders the raw key string written to the backend.
    pub fn render(&self) -> String {
        match self {
            Self::Theme => THEME_KEY.to_string(),
            Self::Annotations(namespace) => match namespace.as_str() {
                SAVED_ARTICLES => SAVED_ARTICLES_KEY.to_string(),
                PATH_PROGRESS => PATH_PROGRESS_KEY.to_string(),
                custom => format!("{ANNOTATIONS_PREFIX}{custom}"),
            },
            Self::ChannelLog(channel) => format!("{CHANNEL_PREFIX}{channel}"),
        }
    }

    /// Short kind label for log events; never includes user-derived text.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Annotations(_) => "annotations",
            Self::ChannelLog(_) => "channel_log",
        }
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
