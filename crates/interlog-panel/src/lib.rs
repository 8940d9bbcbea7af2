//! The Interlog event panel.
//!
//! This crate composes the lower layers into one working panel: host
//! messages flow into the persisted event log, the log is projected into
//! rows for a table widget, and highlight reports from the table drive the
//! detail panel.
//!
//! ```text
//! host message --> Persisted<S> (reduce, save) --> project_log --> TableWidget
//!                                                                      |
//!                                   DetailPanel <-- Selection <-- highlight
//! ```
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration with environment overrides.
//! - [`error`] -- [`PanelError`] for failed persistence.
//! - [`panel`] -- [`Panel`], the composition root.
//! - [`terminal`] -- Plain-text table and detail renderers.
//! - [`widget`] -- The [`TableWidget`] and [`DetailPanel`] render seams.

pub mod config;
pub mod error;
pub mod panel;
pub mod terminal;
pub mod widget;

pub use config::{ConfigError, LoggingConfig, PanelConfig, StorageBackend, StorageConfig, TableConfig};
pub use error::PanelError;
pub use panel::Panel;
pub use terminal::{TerminalDetail, TerminalTable};
pub use widget::{DetailPanel, TableWidget};
