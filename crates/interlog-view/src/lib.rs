//! Display-side state for the Interlog panel.
//!
//! Everything here is derived from the event log and never persisted:
//! the rows the table widget renders, the search applied over them, and
//! which single event the detail panel shows.
//!
//! # Modules
//!
//! - [`columns`] -- The fixed column schema and configurable widths.
//! - [`format`] -- Human-friendly event name formatting.
//! - [`projector`] -- [`project`]: event to [`Row`], pure and total.
//! - [`search`] -- [`SearchQuery`]: free-text and column-scoped row search.
//! - [`selection`] -- [`Selection`]: the highlight state machine.

pub mod columns;
pub mod format;
pub mod projector;
pub mod search;
pub mod selection;

pub use columns::{Column, ColumnKey, ColumnSchema, ColumnSize, ColumnSizeError};
pub use format::{FormatError, display_event_name, format_event_name};
pub use projector::{Cell, CellValue, Row, RowColumns, project, project_log};
pub use search::SearchQuery;
pub use selection::Selection;

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the row types.

    #[test]
    fn export_bindings() {
        use ts_rs::TS;

        let _ = crate::columns::ColumnKey::export_all();
        let _ = crate::columns::Column::export_all();
        let _ = crate::projector::CellValue::export_all();
        let _ = crate::projector::Cell::export_all();
        let _ = crate::projector::RowColumns::export_all();
        let _ = crate::projector::Row::export_all();
    }
}
