//! Messages pushed by the host into the panel.
//!
//! The host tags every message with a string method name. That name is
//! resolved once, at the boundary, into the exhaustive [`HostMessage`]
//! enum so reducers match on variants instead of comparing strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Wire method names that carry a new event.
///
/// `action` is the name older hosts send; `append` is the current one.
pub const APPEND_METHODS: [&str; 2] = ["append", "action"];

/// A message from the host, resolved from its method name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMessage {
    /// A new event to append. The payload is validated by the reducer.
    Append(Value),
    /// A method this version does not understand. Reducers leave their state
    /// unchanged when they see it.
    Unrecognized {
        /// The method name as sent by the host.
        method: String,
    },
}

impl HostMessage {
    /// Resolve a host method name and payload into a message.
    pub fn from_method(method: &str, payload: Value) -> Self {
        if APPEND_METHODS.contains(&method) {
            Self::Append(payload)
        } else {
            Self::Unrecognized {
                method: method.to_owned(),
            }
        }
    }

    /// Short name of the variant, for structured log fields.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Append(_) => "append",
            Self::Unrecognized { .. } => "unrecognized",
        }
    }
}

/// The JSON envelope a host message travels in: `{"method": .., "params": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HostEnvelope {
    /// Method name used to pick the message kind.
    pub method: String,
    /// Method payload; absent means `null`.
    #[serde(default)]
    #[ts(type = "unknown")]
    pub params: Value,
}

impl From<HostEnvelope> for HostMessage {
    fn from(envelope: HostEnvelope) -> Self {
        Self::from_method(&envelope.method, envelope.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn append_and_legacy_action_resolve_to_append() {
        for method in APPEND_METHODS {
            let message = HostMessage::from_method(method, json!({}));
            assert_eq!(message, HostMessage::Append(json!({})));
        }
    }

    #[test]
    fn unknown_method_is_unrecognized() {
        let message = HostMessage::from_method("snapshot", json!({ "x": 1 }));
        assert_eq!(
            message,
            HostMessage::Unrecognized {
                method: "snapshot".to_owned()
            }
        );
        assert_eq!(message.kind(), "unrecognized");
    }

    #[test]
    fn envelope_without_params_carries_null() {
        let envelope: Result<HostEnvelope, _> =
            serde_json::from_str(r#"{"method":"action"}"#);
        let message = envelope.ok().map(HostMessage::from);
        assert_eq!(message, Some(HostMessage::Append(Value::Null)));
    }
}
