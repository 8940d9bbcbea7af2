//! Error types for the panel layer.

use interlog_store::StoreError;

/// Errors that can occur while the panel handles a host message or a
/// user action.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// The event log could not be persisted.
    #[error("event log persistence failed: {0}")]
    Store(#[from] StoreError),
}
