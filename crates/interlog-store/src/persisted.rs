//! The persisted event log and its reducer entry point.
//!
//! [`Persisted`] is the only owner of the live [`EventLog`]. The value it
//! holds is always the value last written to the backend: an append whose
//! save fails is withdrawn again, so a failed write never leaves memory and
//! storage disagreeing.

use interlog_log::{EventLog, ReduceOutcome};
use interlog_types::HostMessage;
use tracing::{info, warn};

use crate::{EventStore, StoreError};

/// The host's persistence facility: current log plus its backend.
#[derive(Debug)]
pub struct Persisted<S> {
    store: S,
    state: EventLog,
}

impl<S: EventStore> Persisted<S> {
    /// Open the backend and restore the last saved log.
    ///
    /// A backend that has never been written yields an empty log.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read or holds a
    /// corrupt log.
    pub fn open(store: S) -> Result<Self, StoreError> {
        let state = store.load()?.unwrap_or_default();
        info!(
            location = %store.location(),
            events = state.len(),
            "event log restored"
        );
        Ok(Self { store, state })
    }

    /// Return the current log.
    pub const fn state(&self) -> &EventLog {
        &self.state
    }

    /// Return the backend.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Run one host message through the log reducer.
    ///
    /// Only a step that appends an event touches the backend.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the changed log could not be saved; the
    /// current log is left as it was.
    pub fn reduce(&mut self, message: &HostMessage) -> Result<ReduceOutcome, StoreError> {
        let outcome = self.state.apply(message);
        if let ReduceOutcome::Appended(id) = outcome {
            if let Err(error) = self.store.save(&self.state) {
                warn!(id = %id, %error, "append not persisted, withdrawing it");
                self.state.undo_append(id);
                return Err(error);
            }
        }
        Ok(outcome)
    }

    /// Empty the persisted log.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the empty log could not be saved; the
    /// current log is left as it was.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.save(&EventLog::new())?;
        self.state = std::mem::take(&mut self.state).clear();
        Ok(())
    }

    /// Overwrite the persisted log directly.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the log could not be saved; the current
    /// log is left as it was.
    pub fn set(&mut self, log: EventLog) -> Result<(), StoreError> {
        self.store.save(&log)?;
        self.state = log;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use interlog_types::EventId;
    use serde_json::json;

    /// A backend that restores `restored` but whose saves always fail.
    #[derive(Default)]
    struct BrokenStore {
        restored: Option<EventLog>,
    }

    impl EventStore for BrokenStore {
        fn load(&self) -> Result<Option<EventLog>, StoreError> {
            Ok(self.restored.clone())
        }

        fn save(&mut self, _log: &EventLog) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: "broken".into(),
                source: std::io::Error::other("disk full"),
            })
        }

        fn location(&self) -> String {
            "broken".to_owned()
        }
    }

    fn append(name: &str) -> HostMessage {
        HostMessage::from_method(
            "action",
            json!({
                "level": "info", "service": "auth", "scope": "login",
                "eventName": name, "message": "ok", "data": {},
                "time": "2024-05-01T10:00:00Z"
            }),
        )
    }

    #[test]
    fn open_empty_backend_gives_empty_log() {
        let persisted = Persisted::open(MemoryStore::new());
        assert!(persisted.is_ok_and(|p| p.state().is_empty()));
    }

    #[test]
    fn open_restores_previous_session() {
        let earlier = EventLog::new().append(&json!({
            "level": "info", "service": "auth", "scope": "login",
            "eventName": "Earlier", "message": "", "time": ""
        }));
        let persisted = Persisted::open(MemoryStore::with_log(earlier.clone()));
        assert_eq!(persisted.ok().map(|p| p.state().clone()), Some(earlier));
    }

    #[test]
    fn only_appends_are_written_through() {
        let mut persisted = Persisted::open(MemoryStore::new()).unwrap();

        let appended = persisted.reduce(&append("A"));
        let rejected = persisted.reduce(&HostMessage::Append(json!({})));
        let ignored = persisted.reduce(&HostMessage::from_method("ping", json!(null)));

        assert_eq!(appended.ok(), Some(ReduceOutcome::Appended(EventId::FIRST)));
        assert_eq!(rejected.ok(), Some(ReduceOutcome::Rejected));
        assert_eq!(ignored.ok(), Some(ReduceOutcome::Ignored));
        assert_eq!(persisted.store().writes(), 1);
        assert_eq!(persisted.store().stored(), Some(persisted.state()));
    }

    #[test]
    fn set_overwrites_state_and_backend() {
        let mut persisted = Persisted::open(MemoryStore::new()).unwrap();
        let _ = persisted.reduce(&append("A"));
        let _ = persisted.reduce(&append("B"));

        assert!(persisted.set(EventLog::new()).is_ok());
        assert!(persisted.state().is_empty());
        assert_eq!(persisted.store().stored().map(EventLog::len), Some(0));
    }

    #[test]
    fn failed_save_keeps_previous_state() {
        let mut persisted = Persisted::open(BrokenStore::default()).unwrap();
        assert!(persisted.reduce(&append("A")).is_err());
        assert!(persisted.state().is_empty());
    }

    #[test]
    fn failed_save_withdraws_only_the_new_event() {
        let earlier = EventLog::new().append(&json!({
            "level": "info", "service": "auth", "scope": "login",
            "eventName": "Earlier", "message": "", "time": ""
        }));
        let mut persisted = Persisted::open(BrokenStore {
            restored: Some(earlier.clone()),
        })
        .unwrap();

        assert!(persisted.reduce(&append("Lost")).is_err());
        assert_eq!(persisted.state(), &earlier);
        assert_eq!(persisted.state().next_id().ok(), Some(EventId::new(1)));
    }

    #[test]
    fn clear_empties_state_and_backend() {
        let mut persisted = Persisted::open(MemoryStore::new()).unwrap();
        persisted.reduce(&append("A")).unwrap();

        persisted.clear().unwrap();
        assert!(persisted.state().is_empty());
        assert_eq!(persisted.store().stored().map(EventLog::len), Some(0));
        assert_eq!(persisted.store().writes(), 2);
    }

    #[test]
    fn failed_clear_keeps_events() {
        let earlier = EventLog::new().append(&json!({
            "level": "info", "service": "auth", "scope": "login",
            "eventName": "Earlier", "message": "", "time": ""
        }));
        let mut persisted = Persisted::open(BrokenStore {
            restored: Some(earlier),
        })
        .unwrap();

        assert!(persisted.clear().is_err());
        assert_eq!(persisted.state().len(), 1);
    }
}
