//! The panel: persisted log, selection, and the two render targets.
//!
//! [`Panel`] is the composition root. Host messages go to the persisted
//! log; highlight reports from the table go to the selection; the clear
//! action resets both. After every step that changes what is visible, the
//! table is re-rendered from a fresh projection of the log and the detail
//! panel from the current selection.

use interlog_log::{EventLog, ReduceOutcome};
use interlog_store::{EventStore, Persisted};
use interlog_types::{EventId, HostMessage};
use interlog_view::{ColumnSchema, Row, SearchQuery, Selection, project_log};
use tracing::{debug, info};

use crate::config::TableConfig;
use crate::error::PanelError;
use crate::widget::{DetailPanel, TableWidget};

/// One live event panel.
#[derive(Debug)]
pub struct Panel<S, T, D> {
    persisted: Persisted<S>,
    selection: Selection,
    table: T,
    detail: D,
    table_config: TableConfig,
    schema: ColumnSchema,
}

impl<S, T, D> Panel<S, T, D>
where
    S: EventStore,
    T: TableWidget,
    D: DetailPanel,
{
    /// Build a panel over an already-opened log with nothing selected.
    pub fn new(persisted: Persisted<S>, table: T, detail: D, table_config: TableConfig) -> Self {
        let schema = ColumnSchema::new(&table_config.column_sizes);
        Self {
            persisted,
            selection: Selection::new(),
            table,
            detail,
            table_config,
            schema,
        }
    }

    /// Handle one message from the host.
    ///
    /// The table is re-rendered only when the log changed.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Store`] if an appended event could not be
    /// saved; the log is unchanged in that case.
    pub fn receive(&mut self, message: &HostMessage) -> Result<ReduceOutcome, PanelError> {
        let outcome = self.persisted.reduce(message)?;
        match outcome {
            ReduceOutcome::Appended(id) => {
                debug!(id = %id, kind = message.kind(), "event appended");
                self.render_table(&SearchQuery::new());
            }
            ReduceOutcome::Rejected | ReduceOutcome::Ignored => {
                debug!(kind = message.kind(), ?outcome, "message left log unchanged");
            }
        }
        Ok(outcome)
    }

    /// Handle a highlight report from the table widget.
    pub fn on_highlight(&mut self, ids: &[EventId]) {
        let current = std::mem::take(&mut self.selection);
        self.selection = current.on_highlight(ids, self.persisted.state());
        self.detail.render(self.selection.detail());
    }

    /// Empty the log and drop any selection.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Store`] if the empty log could not be saved;
    /// the log and selection are unchanged in that case.
    pub fn clear(&mut self) -> Result<(), PanelError> {
        self.persisted.clear()?;
        self.selection = std::mem::take(&mut self.selection).clear();
        info!("event panel cleared");
        self.render();
        Ok(())
    }

    /// Re-render both the table and the detail panel.
    pub fn render(&mut self) {
        self.render_table(&SearchQuery::new());
        self.detail.render(self.selection.detail());
    }

    /// Re-render the table showing only rows that match `query`.
    pub fn render_filtered(&mut self, query: &SearchQuery) {
        self.render_table(query);
    }

    /// Project the whole log into rows, in log order.
    pub fn rows(&self) -> Vec<Row> {
        project_log(self.persisted.state())
    }

    /// Return the current log.
    pub const fn log(&self) -> &EventLog {
        self.persisted.state()
    }

    /// Return the current selection.
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Return the column schema handed to the table widget.
    pub const fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Return the persistence facility.
    pub const fn persisted(&self) -> &Persisted<S> {
        &self.persisted
    }

    /// Return the table widget.
    pub const fn table(&self) -> &T {
        &self.table
    }

    /// Return the detail panel.
    pub const fn detail(&self) -> &D {
        &self.detail
    }

    /// Take the panel apart, returning the persistence facility and both
    /// render targets.
    pub fn into_parts(self) -> (Persisted<S>, T, D) {
        (self.persisted, self.table, self.detail)
    }

    fn render_table(&mut self, query: &SearchQuery) {
        let rows = self.rows();
        if query.is_empty() {
            self.table.render(&self.table_config, &self.schema, &rows);
        } else {
            let matching: Vec<Row> = query.filter(&rows).into_iter().cloned().collect();
            self.table.render(&self.table_config, &self.schema, &matching);
        }
    }
}
