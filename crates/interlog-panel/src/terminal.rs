//! Plain-text render targets used by the `interlog` binary.
//!
//! [`TerminalTable`] lays rows out in fixed-width columns: a percentage
//! width is a share of [`TerminalTable::width`] characters, and flex or
//! unsized columns split whatever is left evenly. Multi-line cells (the data column) continue on
//! following lines under the same column.
//!
//! [`TerminalDetail`] prints the selected event as pretty JSON.

use std::io::Write;

use interlog_types::Event;
use interlog_view::{CellValue, Column, ColumnSchema, ColumnSize, Row};
use tracing::warn;

use crate::config::TableConfig;
use crate::widget::{DetailPanel, TableWidget};

/// Default line width when none is configured.
pub const DEFAULT_WIDTH: usize = 120;

/// Minimum width of any column, in characters.
const MIN_COLUMN_WIDTH: usize = 6;

/// Table widget that writes a text table to `W`.
#[derive(Debug)]
pub struct TerminalTable<W> {
    out: W,
    width: usize,
}

impl<W: Write> TerminalTable<W> {
    /// Write tables of at most `width` characters per line to `out`.
    pub const fn new(out: W, width: usize) -> Self {
        Self { out, width }
    }

    /// Return the configured line width.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Consume the widget and return its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_table(
        &mut self,
        table: &TableConfig,
        schema: &ColumnSchema,
        rows: &[Row],
    ) -> std::io::Result<()> {
        let widths = column_widths(schema.columns(), self.width);
        writeln!(self.out, "== {} ({}) ==", table.title, rows.len())?;

        let header: Vec<String> = schema.columns().iter().map(|c| c.label.clone()).collect();
        writeln!(self.out, "{}", layout_line(&header, &widths))?;

        for row in rows {
            let cells: Vec<Vec<String>> = schema
                .columns()
                .iter()
                .map(|column| cell_lines(&row.cell(column.key).value, table.multiline))
                .collect();
            let height = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
            for line in 0..height {
                let parts: Vec<String> = cells
                    .iter()
                    .map(|lines| lines.get(line).cloned().unwrap_or_default())
                    .collect();
                writeln!(self.out, "{}", layout_line(&parts, &widths))?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write> TableWidget for TerminalTable<W> {
    fn render(&mut self, table: &TableConfig, schema: &ColumnSchema, rows: &[Row]) {
        if let Err(e) = self.write_table(table, schema, rows) {
            warn!(error = %e, "failed to write event table");
        }
    }
}

/// Detail panel that writes the selected event to `W`.
#[derive(Debug)]
pub struct TerminalDetail<W> {
    out: W,
}

impl<W: Write> TerminalDetail<W> {
    /// Write event details to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the panel and return its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_detail(&mut self, detail: Option<&Event>) -> std::io::Result<()> {
        match detail {
            Some(event) => {
                let body = serde_json::to_string_pretty(event).map_err(std::io::Error::other)?;
                writeln!(self.out, "-- event {} --", event.id)?;
                writeln!(self.out, "{body}")?;
            }
            None => writeln!(self.out, "-- no event selected --")?,
        }
        self.out.flush()
    }
}

impl<W: Write> DetailPanel for TerminalDetail<W> {
    fn render(&mut self, detail: Option<&Event>) {
        if let Err(e) = self.write_detail(detail) {
            warn!(error = %e, "failed to write event details");
        }
    }
}

/// Resolve each column to a width in characters.
fn column_widths(columns: &[Column], total: usize) -> Vec<usize> {
    let fixed: Vec<Option<usize>> = columns
        .iter()
        .map(|column| match column.size {
            Some(ColumnSize::Percent(pct)) => {
                Some((total.saturating_mul(usize::from(pct)) / 100).max(MIN_COLUMN_WIDTH))
            }
            _ => None,
        })
        .collect();

    let used: usize = fixed.iter().flatten().sum();
    let remaining = total.saturating_sub(used);
    let flex_count = fixed.iter().filter(|w| w.is_none()).count().max(1);
    let share = remaining
        .checked_div(flex_count)
        .unwrap_or(remaining)
        .max(MIN_COLUMN_WIDTH);

    fixed.into_iter().map(|w| w.unwrap_or(share)).collect()
}

/// Split a cell into display lines.
fn cell_lines(value: &CellValue, multiline: bool) -> Vec<String> {
    match value {
        CellValue::Text(text) => vec![text.clone()],
        CellValue::Lines(lines) if multiline => lines.clone(),
        CellValue::Lines(lines) => vec![lines.join(", ")],
    }
}

/// Pad or truncate each part to its column width and join with a space.
fn layout_line(parts: &[String], widths: &[usize]) -> String {
    let cells: Vec<String> = parts
        .iter()
        .zip(widths)
        .map(|(part, &width)| fit(part, width))
        .collect();
    cells.join(" ").trim_end().to_owned()
}

fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return format!("{text:<width$}");
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}~")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use interlog_types::EventId;
    use interlog_view::project;
    use serde_json::json;

    fn event() -> Event {
        Event {
            id: EventId::new(3),
            level: "warn".to_owned(),
            service: "auth".to_owned(),
            scope: "login".to_owned(),
            event_name: "UserLoginFailed".to_owned(),
            message: "bad password".to_owned(),
            data: json!({ "user": "u1", "attempt": 2 })
                .as_object()
                .cloned()
                .unwrap_or_default(),
            error: None,
            time: "2024-05-01T10:00:00Z".to_owned(),
        }
    }

    #[test]
    fn widths_respect_percent_and_share_the_rest() {
        let schema = ColumnSchema::default();
        let widths = column_widths(schema.columns(), 100);
        assert_eq!(widths.len(), 5);
        // Level is 15% of 100; the remaining four columns split 85.
        assert_eq!(widths.first(), Some(&15));
        assert_eq!(widths.get(1), Some(&21));
    }

    #[test]
    fn table_prints_title_header_and_data_lines() {
        let mut widget = TerminalTable::new(Vec::new(), DEFAULT_WIDTH);
        widget.render(
            &TableConfig::default(),
            &ColumnSchema::default(),
            &[project(&event())],
        );
        let text = String::from_utf8(widget.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.first(), Some(&"== Events (1) =="));
        assert!(lines.get(1).unwrap().starts_with("Level"));
        assert!(text.contains("User Login Failed"));
        assert!(text.contains("user = u1"));
        assert!(text.contains("attempt = 2"));
        // Header plus one line per data entry.
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn single_line_mode_joins_data() {
        let table = TableConfig {
            multiline: false,
            ..TableConfig::default()
        };
        let mut widget = TerminalTable::new(Vec::new(), DEFAULT_WIDTH);
        widget.render(&table, &ColumnSchema::default(), &[project(&event())]);
        let text = String::from_utf8(widget.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn long_cells_are_truncated() {
        assert_eq!(fit("abcdefgh", 5), "abcd~");
        assert_eq!(fit("ab", 4), "ab  ");
    }

    #[test]
    fn detail_prints_event_or_placeholder() {
        let mut panel = TerminalDetail::new(Vec::new());
        panel.render(Some(&event()));
        panel.render(None);
        let text = String::from_utf8(panel.into_inner()).unwrap();
        assert!(text.starts_with("-- event 3 --"));
        assert!(text.contains("\"eventName\": \"UserLoginFailed\""));
        assert!(text.trim_end().ends_with("-- no event selected --"));
    }
}
