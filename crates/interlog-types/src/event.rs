//! Stored events and the payload they are built from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::ids::EventId;

/// Free-form structured data attached to an event.
///
/// Keys keep the order in which the host sent them.
pub type EventData = Map<String, Value>;

/// One structured log entry as pushed by the host, before an id is assigned.
///
/// Deserializing into this type is the whole of payload validation: a
/// missing required field or a field of the wrong JSON type rejects the
/// payload. Unknown fields (including any host-supplied `id`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct EventPayload {
    /// Severity label (e.g. `info`, `warn`).
    pub level: String,
    /// Emitting service.
    pub service: String,
    /// Scope within the service.
    pub scope: String,
    /// Identifier-style event name (e.g. `UserLoggedIn`).
    pub event_name: String,
    /// Human-readable message.
    pub message: String,
    /// Structured key/value data; `null` or absent means empty.
    #[serde(default)]
    #[ts(type = "Record<string, unknown> | null")]
    pub data: Option<EventData>,
    /// Error text, when the event describes a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
    /// Timestamp string as produced by the host.
    pub time: String,
}

/// A stored event. Immutable once appended to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Event {
    /// Unique id, strictly increasing in append order.
    pub id: EventId,
    /// Severity label.
    pub level: String,
    /// Emitting service.
    pub service: String,
    /// Scope within the service.
    pub scope: String,
    /// Identifier-style event name.
    pub event_name: String,
    /// Human-readable message.
    pub message: String,
    /// Structured key/value data, possibly empty.
    #[serde(default)]
    #[ts(type = "Record<string, unknown>")]
    pub data: EventData,
    /// Error text, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
    /// Timestamp string as produced by the host.
    pub time: String,
}

impl Event {
    /// Build a stored event from a validated payload and an assigned id.
    pub fn from_payload(id: EventId, payload: EventPayload) -> Self {
        Self {
            id,
            level: payload.level,
            service: payload.service,
            scope: payload.scope,
            event_name: payload.event_name,
            message: payload.message,
            data: payload.data.unwrap_or_default(),
            error: payload.error,
            time: payload.time,
        }
    }
}
