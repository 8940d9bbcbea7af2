//! Append-only event log for the Interlog panel.
//!
//! The log is the panel's only durable state. Every event the host pushes
//! is validated, given the next id, and appended; nothing is ever edited
//! or removed except by clearing the whole log.
//!
//! # Architecture
//!
//! - [`log`] -- The [`EventLog`] struct: ordered events, id assignment and
//!   the host message reducer.
//!
//! # Id assignment
//!
//! | Log state | Id given to the next event |
//! |-----------|----------------------------|
//! | empty | `0` |
//! | highest id `n` | `n + 1` |
//! | highest id `u64::MAX` | none (append rejected) |
//!
//! # Failure model
//!
//! Reducing a host message never fails. A malformed payload is logged and
//! dropped, and a message of an unknown kind is ignored, so a misbehaving
//! host can never leave the log half-updated. The fallible building blocks
//! ([`EventLog::try_append`], [`EventLog::from_events`]) return
//! [`LogError`] for callers that want the reason.
//!
//! # Usage
//!
//! ```
//! use interlog_log::EventLog;
//! use interlog_types::{EventId, HostMessage};
//! use serde_json::json;
//!
//! let log = EventLog::new().reduce(&HostMessage::from_method(
//!     "append",
//!     json!({
//!         "level": "info", "service": "auth", "scope": "login",
//!         "eventName": "UserLoggedIn", "message": "ok",
//!         "data": { "user": "alice" }, "time": "2024-05-01T10:00:00Z"
//!     }),
//! ));
//!
//! assert_eq!(log.len(), 1);
//! assert!(log.by_id(EventId::FIRST).is_some());
//! ```

pub mod log;

// Re-export primary types at crate root.
pub use log::EventLog;

use interlog_types::EventId;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when appending to or rebuilding an event log.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The append payload is not a valid event.
    #[error("invalid event payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Every id up to `u64::MAX` has been handed out.
    #[error("event id space exhausted after id {last}")]
    IdSpaceExhausted {
        /// The highest id already in the log.
        last: EventId,
    },

    /// A restored log does not have strictly increasing ids.
    #[error("event ids must strictly increase: {found} follows {previous}")]
    NonIncreasingId {
        /// The id of the earlier event.
        previous: EventId,
        /// The offending id that does not exceed it.
        found: EventId,
    },

    /// An internal error that should not occur in normal operation.
    #[error("internal event log error: {0}")]
    Internal(&'static str),
}

// ---------------------------------------------------------------------------
// Reducer outcome
// ---------------------------------------------------------------------------

/// What a single reducer step did to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOutcome {
    /// A new event was appended with the given id.
    Appended(EventId),
    /// An append message was dropped because its payload was invalid.
    Rejected,
    /// The message kind is not one the log reacts to.
    Ignored,
}

impl ReduceOutcome {
    /// Whether the step changed the log.
    pub const fn changed(self) -> bool {
        matches!(self, Self::Appended(_))
    }
}
