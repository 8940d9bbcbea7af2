//! Configuration loading and typed config structures for the panel.
//!
//! The configuration lives in a YAML file (by default
//! `interlog-config.yaml`). Every section and field is optional; anything
//! left out takes the default shown on the struct.
//!
//! ```yaml
//! storage:
//!   backend: file            # or "memory"
//!   path: interlog-events.json
//! table:
//!   title: Events
//!   row_line_height: 30
//!   multiline: true
//!   multi_highlight: true
//!   sticky_bottom: true
//!   width: 120
//!   column_sizes:
//!     level: 15%
//!     eventName: flex
//! logging:
//!   level: info
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use interlog_view::columns::default_column_sizes;
use interlog_view::{ColumnKey, ColumnSize};
use serde::Deserialize;
use tracing::warn;

use crate::terminal::DEFAULT_WIDTH;

/// Environment variable that overrides `storage.path` (and selects the
/// file backend).
pub const STORE_PATH_ENV: &str = "INTERLOG_STORE_PATH";

/// Environment variable that overrides `table.width`.
pub const WIDTH_ENV: &str = "INTERLOG_WIDTH";

/// Environment variable that overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "INTERLOG_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level panel configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PanelConfig {
    /// Where the event log is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Options handed to the table widget.
    #[serde(default)]
    pub table: TableConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PanelConfig {
    /// Load configuration from a YAML file, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from `path` if it exists, otherwise start from
    /// defaults; environment overrides apply either way.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    pub fn from_file_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string. No overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(STORE_PATH_ENV).filter(|p| !p.is_empty()) {
            self.storage.backend = StorageBackend::File;
            self.storage.path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(WIDTH_ENV).filter(|w| !w.is_empty()) {
            match raw.parse::<usize>() {
                Ok(width) if width > 0 => self.table.width = width,
                _ => warn!(var = WIDTH_ENV, value = %raw, "ignoring invalid table width override"),
            }
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|l| !l.is_empty()) {
            self.logging.level = level;
        }
    }
}

/// Which persistence backend holds the event log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Keep the log in memory only; it is lost when the process exits.
    Memory,
    /// Keep the log in a JSON file so it survives reloads.
    #[default]
    File,
}

/// Persistence configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Backend selection.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Path of the JSON file used by the file backend.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_store_path(),
        }
    }
}

/// Options handed to the table widget alongside the rows.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableConfig {
    /// Heading shown above the table.
    #[serde(default = "default_title")]
    pub title: String,

    /// Row height in pixels.
    #[serde(default = "default_row_line_height")]
    pub row_line_height: u32,

    /// Whether cells may span several lines (the data column does).
    #[serde(default = "default_true")]
    pub multiline: bool,

    /// Whether several rows can be highlighted at once.
    #[serde(default = "default_true")]
    pub multi_highlight: bool,

    /// Whether the view keeps scrolling to the newest row.
    #[serde(default = "default_true")]
    pub sticky_bottom: bool,

    /// Line width of the plain-text table, in characters.
    #[serde(default = "default_width")]
    pub width: usize,

    /// Column widths keyed by column.
    #[serde(default = "default_column_sizes")]
    pub column_sizes: BTreeMap<ColumnKey, ColumnSize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            row_line_height: default_row_line_height(),
            multiline: true,
            multi_highlight: true,
            sticky_bottom: true,
            width: default_width(),
            column_sizes: default_column_sizes(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_store_path() -> PathBuf {
    PathBuf::from("interlog-events.json")
}

fn default_title() -> String {
    "Events".to_owned()
}

const fn default_row_line_height() -> u32 {
    30
}

const fn default_width() -> usize {
    DEFAULT_WIDTH
}

const fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_owned()
}
