//! Type-safe wrapper for event identifiers.
//!
//! Event ids are plain integers on the wire (the host keys table rows by
//! them), but inside the workspace they are wrapped so an id can never be
//! confused with a row index or a count.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifier of a stored event, assigned by the event log in append order.
///
/// The first event ever appended to an empty log receives [`EventId::FIRST`];
/// every later append receives the successor of the highest id in the log.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct EventId(#[ts(type = "number")] pub u64);

impl EventId {
    /// The id given to the first event of an empty log.
    pub const FIRST: Self = Self(0);

    /// Wrap a raw integer id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the inner integer value.
    pub const fn into_inner(self) -> u64 {
        self.0
    }

    /// Return the id that follows this one, or `None` once the id space is
    /// exhausted.
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl core::fmt::Display for EventId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EventId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<EventId> for u64 {
    fn from(id: EventId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_id_is_zero() {
        assert_eq!(EventId::FIRST.into_inner(), 0);
    }

    #[test]
    fn next_increments_until_exhausted() {
        assert_eq!(EventId::new(4).next(), Some(EventId::new(5)));
        assert_eq!(EventId::new(u64::MAX).next(), None);
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&EventId::new(7)).ok();
        assert_eq!(json.as_deref(), Some("7"));

        let restored: Result<EventId, _> = serde_json::from_str("12");
        assert_eq!(restored.ok(), Some(EventId::new(12)));
    }

    #[test]
    fn display_matches_integer() {
        assert_eq!(EventId::new(42).to_string(), "42");
    }
}
