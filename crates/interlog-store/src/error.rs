//! Error types for the persistence layer.
//!
//! All errors are propagated via [`StoreError`], which wraps the
//! underlying I/O and JSON errors with the path of the file involved.

use std::path::PathBuf;

/// Errors that can occur while loading or saving the event log.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the store file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The stored log could not be parsed or breaks the id invariant.
    #[error("corrupt event log in {}: {source}", .path.display())]
    Corrupt {
        /// The file that was read.
        path: PathBuf,
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// The log could not be serialized for writing.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
