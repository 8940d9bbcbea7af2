//! Persistence facility for the Interlog event log.
//!
//! The host keeps the event log across panel reloads. This crate models
//! that facility: an [`EventStore`] backend that loads and saves whole
//! logs, and [`Persisted`], which holds the current log and runs every
//! incoming host message through the reducer, writing through to the
//! backend whenever the log changes.
//!
//! # Modules
//!
//! - [`error`] -- [`StoreError`] for I/O and parse failures.
//! - [`memory`] -- [`MemoryStore`], a backend that keeps the log in memory.
//! - [`file`] -- [`JsonFileStore`], a backend that keeps the log in a JSON file.
//! - [`persisted`] -- [`Persisted`], the reducer entry point and setter.

pub mod error;
pub mod file;
pub mod memory;
pub mod persisted;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use persisted::Persisted;

use interlog_log::EventLog;

/// A backend that can load and save a whole event log.
pub trait EventStore {
    /// Load the stored log, or `None` if nothing has been stored yet.
    fn load(&self) -> Result<Option<EventLog>, StoreError>;

    /// Replace the stored log with `log`.
    fn save(&mut self, log: &EventLog) -> Result<(), StoreError>;

    /// Short human-readable description of where the log lives.
    fn location(&self) -> String;
}

impl<S: EventStore + ?Sized> EventStore for Box<S> {
    fn load(&self) -> Result<Option<EventLog>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, log: &EventLog) -> Result<(), StoreError> {
        (**self).save(log)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
