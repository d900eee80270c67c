//! Reference catalog: the fixed dataset all views project over.
//!
//! # Responsibility
//! - Hold articles, tools, learning-path steps, channels and seed messages.
//! - Validate identity invariants once, at construction.
//!
//! # Invariants
//! - IDs are non-empty and unique within their collection.
//! - Channel names are unique; every seed-message entry names a declared channel.
//! - A constructed `Catalog` is read-only for the rest of the process.

use crate::model::message::Message;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Common read view over catalog records used by projections.
pub trait CatalogEntry {
    fn id(&self) -> &str;
    /// Primary display text; searched and used by name sort.
    fn title(&self) -> &str;
    /// Secondary descriptive text; searched.
    fn description(&self) -> &str {
        ""
    }
    fn tags(&self) -> &[String] {
        &[]
    }
    /// Category used by exact-match filters; `None` when the record has none.
    fn category(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: String,
    /// Publication date, `YYYY-MM-DD`.
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStep {
    pub id: String,
    pub label: String,
    pub duration_min: u32,
}

impl PathStep {
    /// Approximate duration in whole hours, rounded half up.
    pub fn approx_hours(&self) -> u32 {
        self.duration_min / 60 + u32::from(self.duration_min % 60 >= 30)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

impl CatalogEntry for Article {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.excerpt
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl CatalogEntry for Tool {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
}

impl CatalogEntry for PathStep {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.label
    }
}

/// Unvalidated catalog document, as supplied by configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogData {
    #[serde(default, alias = "blogs")]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub tools: Vec<Tool>,
    #[serde(default)]
    pub path: Vec<PathStep>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    /// Seed messages keyed by channel name.
    #[serde(default)]
    pub initial_messages: BTreeMap<String, Vec<Message>>,
}

#[derive(Debug)]
pub enum CatalogError {
    EmptyId {
        collection: &'static str,
    },
    DuplicateId {
        collection: &'static str,
        id: String,
    },
    /// Seed messages reference a channel the catalog does not declare.
    MissingSeedChannel(String),
    Parse(serde_json::Error),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId { collection } => write!(f, "{collection} entry has an empty id"),
            Self::DuplicateId { collection, id } => {
                write!(f, "duplicate {collection} id: `{id}`")
            }
            Self::MissingSeedChannel(name) => {
                write!(f, "seed messages reference undeclared channel `{name}`")
            }
            Self::Parse(err) => write!(f, "invalid catalog document: {err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Validated, read-only reference catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    data: CatalogData,
}

impl Catalog {
    /// Validates `data` and freezes it into a catalog.
    ///
    /// # Errors
    /// - [`CatalogError::EmptyId`] / [`CatalogError::DuplicateId`] on identity violations.
    /// - [`CatalogError::MissingSeedChannel`] when seeds name an undeclared channel.
    pub fn new(data: CatalogData) -> Result<Self, CatalogError> {
        ensure_unique_ids("article", data.articles.iter().map(|a| a.id.as_str()))?;
        ensure_unique_ids("tool", data.tools.iter().map(|t| t.id.as_str()))?;
        ensure_unique_ids("path step", data.path.iter().map(|s| s.id.as_str()))?;
        ensure_unique_ids("channel", data.channels.iter().map(|c| c.id.as_str()))?;
        ensure_unique_ids("channel name", data.channels.iter().map(|c| c.name.as_str()))?;

        for channel_name in data.initial_messages.keys() {
            if !data.channels.iter().any(|c| &c.name == channel_name) {
                return Err(CatalogError::MissingSeedChannel(channel_name.clone()));
            }
        }

        Ok(Self { data })
    }

    /// Parses and validates a JSON catalog document.
    pub fn from_json(document: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(document)?;
        Self::new(data)
    }

    pub fn articles(&self) -> &[Article] {
        &self.data.articles
    }

    pub fn tools(&self) -> &[Tool] {
        &self.data.tools
    }

    pub fn path(&self) -> &[PathStep] {
        &self.data.path
    }

    pub fn channels(&self) -> &[Channel] {
        &self.data.channels
    }

    pub fn article(&self, id: &str) -> Option<&Article> {
        self.data.articles.iter().find(|a| a.id == id)
    }

    pub fn tool(&self, id: &str) -> Option<&Tool> {
        self.data.tools.iter().find(|t| t.id == id)
    }

    pub fn path_step(&self, id: &str) -> Option<&PathStep> {
        self.data.path.iter().find(|s| s.id == id)
    }

    /// Looks up a channel by its exact name.
    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.data.channels.iter().find(|c| c.name == name)
    }

    /// Seed messages for a channel; empty for channels without seeds.
    pub fn seed_messages(&self, channel_name: &str) -> &[Message] {
        self.data
            .initial_messages
            .get(channel_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Distinct tool categories in first-appearance order.
    pub fn tool_categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.data
            .tools
            .iter()
            .map(|t| t.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }
}

fn ensure_unique_ids<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(CatalogError::EmptyId { collection });
        }
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                collection,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
