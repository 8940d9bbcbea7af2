//! Rendering seams between the panel and whatever draws it.
//!
//! The panel never draws anything itself. It hands the table widget the
//! projected rows with the column schema and table options, and hands the
//! detail panel the selected event (or nothing). Implementations decide
//! what "rendering" means: the `interlog` binary writes plain text to a
//! terminal, tests record the calls.

use interlog_types::Event;
use interlog_view::{ColumnSchema, Row};

use crate::config::TableConfig;

/// The scrolling table of events.
pub trait TableWidget {
    /// Draw `rows` in order, using `schema` for the column layout.
    fn render(&mut self, table: &TableConfig, schema: &ColumnSchema, rows: &[Row]);
}

/// The sidebar showing one event's full payload.
pub trait DetailPanel {
    /// Draw `detail`, or an empty sidebar when nothing is selected.
    fn render(&mut self, detail: Option<&Event>);
}
