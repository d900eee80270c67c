//! Runtime configuration for the core and its host process.
//!
//! # Invariants
//! - Loading configuration never fails startup: malformed overrides are ignored
//!   with a warning and the default is kept.
//! - `search_debounce_ms` is at least 1.

use crate::logging::default_log_level;
use crate::schedule::DEFAULT_QUIET_MS;
use log::warn;
use serde::Deserialize;
use std::path::PathBuf;

/// File name of the local storage database inside `data_dir`.
pub const STORAGE_DB_FILE_NAME: &str = "devhub_local_storage.sqlite3";

pub const ENV_DATA_DIR: &str = "DEVHUB_DATA_DIR";
pub const ENV_LOG_LEVEL: &str = "DEVHUB_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "DEVHUB_LOG_DIR";
pub const ENV_SEARCH_DEBOUNCE_MS: &str = "DEVHUB_SEARCH_DEBOUNCE_MS";
pub const ENV_BACKEND_URL: &str = "DEVHUB_BACKEND_URL";
pub const ENV_CATALOG_PATH: &str = "DEVHUB_CATALOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Directory of the local storage database; `None` keeps state in memory only.
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
    /// Absolute log directory; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub search_debounce_ms: u64,
    /// Base URL of the status endpoint probed at startup.
    pub backend_url: Option<String>,
    /// JSON catalog document replacing the built-in catalog.
    pub catalog_path: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
            search_debounce_ms: DEFAULT_QUIET_MS,
            backend_url: None,
            catalog_path: None,
        }
    }
}

impl CoreConfig {
    /// Parses a JSON config document; missing fields take defaults.
    pub fn from_json(document: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(document)?;
        Ok(config.normalized())
    }

    /// Defaults overridden by `DEVHUB_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from `lookup`; blank values are treated as unset.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(value) = read(ENV_DATA_DIR) {
            self.data_dir = Some(PathBuf::from(value));
        }
        if let Some(value) = read(ENV_LOG_LEVEL) {
            self.log_level = value;
        }
        if let Some(value) = read(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(value));
        }
        if let Some(value) = read(ENV_SEARCH_DEBOUNCE_MS) {
            match value.parse::<u64>() {
                Ok(ms) => self.search_debounce_ms = ms,
                Err(err) => warn!(
                    "event=config_load module=config status=ignored var={} error={}",
                    ENV_SEARCH_DEBOUNCE_MS, err
                ),
            }
        }
        if let Some(value) = read(ENV_BACKEND_URL) {
            self.backend_url = Some(value);
        }
        if let Some(value) = read(ENV_CATALOG_PATH) {
            self.catalog_path = Some(PathBuf::from(value));
        }

        self.normalized()
    }

    /// Path of the local storage database, when a data directory is configured.
    pub fn storage_db_path(&self) -> Option<PathBuf> {
        self.data_dir
            .as_ref()
            .map(|dir| dir.join(STORAGE_DB_FILE_NAME))
    }

    /// Status endpoint URL (`<backend_url>/api/`).
    pub fn health_endpoint(&self) -> Option<String> {
        self.backend_url
            .as_ref()
            .map(|base| format!("{}/api/", base.trim_end_matches('/')))
    }

    fn normalized(mut self) -> Self {
        self.search_debounce_ms = self.search_debounce_ms.max(1);
        self
    }
}
