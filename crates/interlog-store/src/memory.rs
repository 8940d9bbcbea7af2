//! In-memory store backend.

use interlog_log::EventLog;

use crate::{EventStore, StoreError};

/// Keeps the saved log in memory. Nothing survives the process.
///
/// Used when persistence is disabled and by tests, which can inspect how
/// many writes reached the backend.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    stored: Option<EventLog>,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            stored: None,
            writes: 0,
        }
    }

    /// Create a store that already holds `log`, as if saved by an earlier
    /// session.
    pub const fn with_log(log: EventLog) -> Self {
        Self {
            stored: Some(log),
            writes: 0,
        }
    }

    /// Return the number of successful saves.
    pub const fn writes(&self) -> usize {
        self.writes
    }

    /// Return the currently stored log, if any.
    pub const fn stored(&self) -> Option<&EventLog> {
        self.stored.as_ref()
    }
}

impl EventStore for MemoryStore {
    fn load(&self) -> Result<Option<EventLog>, StoreError> {
        Ok(self.stored.clone())
    }

    fn save(&mut self, log: &EventLog) -> Result<(), StoreError> {
        self.stored = Some(log.clone());
        self.writes = self.writes.saturating_add(1);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_owned()
    }
}
