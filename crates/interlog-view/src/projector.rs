//! Projection of stored events into table rows.
//!
//! [`project`] is a pure, total function: the same event always yields the
//! same [`Row`], and no input makes it fail. Every fallible step (name
//! formatting, timestamp parsing, export serialization) has a fallback.

use chrono::{DateTime, FixedOffset};
use interlog_log::EventLog;
use interlog_types::{Event, EventData, EventId};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;
use ts_rs::TS;

use crate::columns::ColumnKey;
use crate::format::display_event_name;

/// Separator between service and event name in the composite filter value.
pub const FILTER_SEPARATOR: &str = " ";

/// What a cell displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum CellValue {
    /// A single line of text.
    Text(String),
    /// Zero or more lines, one per data entry.
    Lines(Vec<String>),
}

/// One table cell: what is shown and what column-scoped search matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Cell {
    /// Display value.
    pub value: CellValue,
    /// Value matched by a search scoped to this column.
    pub filter_value: String,
}

impl Cell {
    fn text(value: String, filter_value: String) -> Self {
        Self {
            value: CellValue::Text(value),
            filter_value,
        }
    }

    /// Cell whose display and filter values are the same text.
    fn verbatim(text: &str) -> Self {
        Self::text(text.to_owned(), text.to_owned())
    }
}

/// The per-column cells of a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct RowColumns {
    /// Level column.
    pub level: Cell,
    /// Scope column.
    pub scope: Cell,
    /// Event name column (formatted display, raw filter value).
    pub event_name: Cell,
    /// Message column.
    pub message: Cell,
    /// Data column (`key = value` lines).
    pub data: Cell,
}

/// A table row derived from one event. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Row {
    /// Row key, equal to the event id.
    pub key: EventId,
    /// Per-column cells.
    pub columns: RowColumns,
    /// Value matched by free-text search: service and event name.
    pub filter_value: String,
    /// Pretty-printed JSON of the whole event, for clipboard export.
    pub copy_text: String,
    /// Parsed event time, used as a sort key; `None` if unparsable.
    #[ts(type = "string | null")]
    pub timestamp: Option<DateTime<FixedOffset>>,
}

impl Row {
    /// Return the cell for a column.
    pub const fn cell(&self, key: ColumnKey) -> &Cell {
        match key {
            ColumnKey::Level => &self.columns.level,
            ColumnKey::Scope => &self.columns.scope,
            ColumnKey::EventName => &self.columns.event_name,
            ColumnKey::Message => &self.columns.message,
            ColumnKey::Data => &self.columns.data,
        }
    }
}

/// Project one event into a row.
pub fn project(event: &Event) -> Row {
    let data_lines = data_lines(&event.data);
    let data_filter = data_lines.join("\n");

    Row {
        key: event.id,
        columns: RowColumns {
            level: Cell::verbatim(&event.level),
            scope: Cell::verbatim(&event.scope),
            event_name: Cell::text(
                display_event_name(&event.event_name),
                event.event_name.clone(),
            ),
            message: Cell::verbatim(&event.message),
            data: Cell {
                value: CellValue::Lines(data_lines),
                filter_value: data_filter,
            },
        },
        filter_value: format!("{}{FILTER_SEPARATOR}{}", event.service, event.event_name),
        copy_text: copy_text(event),
        timestamp: DateTime::parse_from_rfc3339(&event.time).ok(),
    }
}

/// Project every event of a log, in log order.
pub fn project_log(log: &EventLog) -> Vec<Row> {
    log.all().iter().map(project).collect()
}

/// Render data entries as `key = value` lines in the map's own order.
///
/// Strings are shown without quotes; every other value as compact JSON.
pub fn data_lines(data: &EventData) -> Vec<String> {
    data.iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{key} = {s}"),
            other => format!("{key} = {other}"),
        })
        .collect()
}

fn copy_text(event: &Event) -> String {
    serde_json::to_string_pretty(event).unwrap_or_else(|error| {
        warn!(id = %event.id, %error, "event not serializable, exporting debug form");
        format!("{event:#?}")
    })
}
