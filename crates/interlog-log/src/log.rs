//! The event log: an append-only, id-ordered sequence of events.
//!
//! # Design
//!
//! - **Append-only**: events are never modified or removed individually.
//! - **Ordered ids**: ids strictly increase in append order, so the last
//!   event always holds the highest id and lookups can binary search.
//! - **Value semantics**: the reducer entry points take the log by value
//!   and hand back the next log, mirroring how the host stores it.

use interlog_types::{Event, EventId, EventPayload, HostMessage};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{LogError, ReduceOutcome};

/// On-disk shape of a log before its id invariant has been checked.
#[derive(Deserialize)]
struct RawLog {
    #[serde(default)]
    events: Vec<Event>,
}

impl TryFrom<RawLog> for EventLog {
    type Error = LogError;

    fn try_from(raw: RawLog) -> Result<Self, Self::Error> {
        Self::from_events(raw.events)
    }
}

/// The ordered collection of every event the host has pushed since the
/// last clear.
///
/// Serializes as `{"events": [...]}`. Deserializing re-checks that ids are
/// strictly increasing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLog")]
pub struct EventLog {
    /// All events, in append order.
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty log.
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Rebuild a log from previously stored events.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::NonIncreasingId`] if the ids are not strictly
    /// increasing in the given order.
    pub fn from_events(events: Vec<Event>) -> Result<Self, LogError> {
        for pair in events.windows(2) {
            if let [previous, next] = pair {
                if next.id <= previous.id {
                    return Err(LogError::NonIncreasingId {
                        previous: previous.id,
                        found: next.id,
                    });
                }
            }
        }
        Ok(Self { events })
    }

    /// Return the number of events in the log.
    pub const fn len(&self) -> usize {
        self.events.len()
    }

    /// Return whether the log has no events.
    pub const fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return all events, in append order.
    pub fn all(&self) -> &[Event] {
        &self.events
    }

    /// Look up an event by id.
    pub fn by_id(&self, id: EventId) -> Option<&Event> {
        self.events
            .binary_search_by_key(&id, |event| event.id)
            .ok()
            .and_then(|index| self.events.get(index))
    }

    /// Return the id the next appended event will receive.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::IdSpaceExhausted`] if the highest id in the log
    /// is `u64::MAX`.
    pub fn next_id(&self) -> Result<EventId, LogError> {
        match self.events.last() {
            None => Ok(EventId::FIRST),
            Some(last) => last
                .id
                .next()
                .ok_or(LogError::IdSpaceExhausted { last: last.id }),
        }
    }

    /// Validate a raw append payload and append it as a new event.
    ///
    /// The log is left untouched when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidPayload`] if the payload does not
    /// deserialize into an event, or [`LogError::IdSpaceExhausted`] if no
    /// id is left to assign.
    pub fn try_append(&mut self, raw: &Value) -> Result<&Event, LogError> {
        let payload = EventPayload::deserialize(raw)?;
        let id = self.next_id()?;
        self.events.push(Event::from_payload(id, payload));

        debug!(id = %id, total = self.events.len(), "event appended");
        self.events
            .last()
            .ok_or(LogError::Internal("failed to retrieve event after append"))
    }

    /// Append a raw payload, returning the next log.
    ///
    /// An invalid payload is logged and the log is returned unchanged.
    #[must_use]
    pub fn append(mut self, raw: &Value) -> Self {
        if let Err(error) = self.try_append(raw) {
            warn!(%error, "dropping malformed event payload");
        }
        self
    }

    /// Withdraw the most recent append if it assigned `id`.
    ///
    /// Used to roll back an append whose write-through failed. Returns the
    /// withdrawn event, or `None` when the last event has another id.
    pub fn undo_append(&mut self, id: EventId) -> Option<Event> {
        if self.events.last().is_some_and(|last| last.id == id) {
            self.events.pop()
        } else {
            None
        }
    }

    /// Return an empty log, discarding every event.
    #[must_use]
    pub fn clear(self) -> Self {
        info!(discarded = self.events.len(), "event log cleared");
        Self::new()
    }

    /// Apply one host message in place and report what happened.
    pub fn apply(&mut self, message: &HostMessage) -> ReduceOutcome {
        match message {
            HostMessage::Append(raw) => match self.try_append(raw) {
                Ok(event) => ReduceOutcome::Appended(event.id),
                Err(error) => {
                    warn!(%error, "dropping malformed event payload");
                    ReduceOutcome::Rejected
                }
            },
            HostMessage::Unrecognized { method } => {
                debug!(method = %method, "ignoring host message of unknown kind");
                ReduceOutcome::Ignored
            }
        }
    }

    /// Reduce one host message into the next log.
    #[must_use]
    pub fn reduce(mut self, message: &HostMessage) -> Self {
        self.apply(message);
        self
    }
}
