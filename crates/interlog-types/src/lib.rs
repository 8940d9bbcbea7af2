//! Shared type definitions for the Interlog panel.
//!
//! This crate is the single source of truth for the types that cross the
//! boundary between the host and the panel core. Types defined here flow
//! to `TypeScript` via `ts-rs` so the host bindings stay in sync.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe wrapper for event identifiers
//! - [`event`] -- Stored events and the host payload they are built from
//! - [`message`] -- Host messages and their JSON envelope

pub mod event;
pub mod ids;
pub mod message;

// Re-export all public types at crate root for convenience.
pub use event::{Event, EventData, EventPayload};
pub use ids::EventId;
pub use message::{APPEND_METHODS, HostEnvelope, HostMessage};
