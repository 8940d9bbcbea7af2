//! JSON file store backend.
//!
//! The whole log is written as one JSON document (`{"events": [...]}`).
//! Writes go to a sibling temp file that is then renamed over the target,
//! so a crash mid-write leaves the previous log intact.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use interlog_log::EventLog;
use tracing::debug;

use crate::{EventStore, StoreError};

/// Keeps the log in a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file does not need to exist; it is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Return the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl EventStore for JsonFileStore {
    fn load(&self) -> Result<Option<EventLog>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let log: EventLog =
            serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), events = log.len(), "event log loaded");
        Ok(Some(log))
    }

    fn save(&mut self, log: &EventLog) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(log)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let temp = self.temp_path();
        std::fs::write(&temp, bytes).map_err(|e| self.io_error(e))?;
        std::fs::rename(&temp, &self.path).map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), events = log.len(), "event log saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
