//! Terminal harness for the Interlog event panel.
//!
//! Drives a [`Panel`] from the command line, rendering the table and the
//! detail panel as plain text on stdout. Diagnostics go to stderr.
//!
//! ```text
//! interlog replay          < envelopes.jsonl   # append events from the host
//! interlog show [query]                         # print the table
//! interlog inspect <id>                         # print one event's details
//! interlog clear                                # empty the log
//! ```
//!
//! The configuration file is read from `INTERLOG_CONFIG` (default
//! `interlog-config.yaml`); see [`PanelConfig`] for its layout.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use interlog_panel::{Panel, PanelConfig, StorageBackend, TerminalDetail, TerminalTable};
use interlog_store::{EventStore, JsonFileStore, MemoryStore, Persisted};
use interlog_types::{EventId, HostEnvelope, HostMessage};
use interlog_view::SearchQuery;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable naming the configuration file.
const CONFIG_ENV: &str = "INTERLOG_CONFIG";

/// Configuration file used when `INTERLOG_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "interlog-config.yaml";

#[derive(Debug, Parser)]
#[command(name = "interlog")]
#[command(about = "Interlog - live event log panel for the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Command {
    /// Append host envelopes read as JSON lines from stdin, then print the table
    Replay,
    /// Print the event table
    Show {
        /// Free-text filter over service and event name
        query: Vec<String>,
    },
    /// Print the details of one event
    Inspect {
        /// Id of the event to select
        id: u64,
    },
    /// Empty the event log
    Clear,
}

/// Application entry point.
///
/// Loads configuration, initializes logging, opens the configured store,
/// and runs one command against the panel.
///
/// # Errors
///
/// Returns an error if configuration, persistence, or argument parsing
/// fails.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = std::env::var(CONFIG_ENV)
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = PanelConfig::from_file_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    // Logs go to stderr so stdout carries only the rendered panel
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let command = cli.command;
    info!(?command, config = %config_path.display(), "interlog starting");

    let store: Box<dyn EventStore> = match config.storage.backend {
        StorageBackend::Memory => Box::new(MemoryStore::new()),
        StorageBackend::File => Box::new(JsonFileStore::new(&config.storage.path)),
    };
    let mut persisted = Persisted::open(store)?;

    if matches!(command, Command::Replay) {
        let stdin = std::io::stdin();
        replay(&mut persisted, stdin.lock())?;
    }

    let mut panel = Panel::new(
        persisted,
        TerminalTable::new(std::io::stdout(), config.table.width),
        TerminalDetail::new(std::io::stdout()),
        config.table,
    );

    match command {
        Command::Replay => panel.render_filtered(&SearchQuery::new()),
        Command::Show { query } => {
            panel.render_filtered(&SearchQuery::new().text(&query.join(" ")));
        }
        Command::Inspect { id } => panel.on_highlight(&[EventId::new(id)]),
        Command::Clear => panel.clear()?,
    }
    Ok(())
}

/// Reduce every envelope line from `input` through the persisted log.
///
/// Blank lines are skipped silently, unparsable ones with a warning.
fn replay<S: EventStore>(persisted: &mut Persisted<S>, input: impl BufRead) -> anyhow::Result<()> {
    let mut appended = 0_usize;
    for (index, line) in input.lines().enumerate() {
        let line = line.context("reading envelopes from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let envelope: HostEnvelope = match serde_json::from_str(&line) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(line = index.saturating_add(1), error = %e, "skipping unparsable envelope");
                continue;
            }
        };
        if persisted.reduce(&HostMessage::from(envelope))?.changed() {
            appended = appended.saturating_add(1);
        }
    }
    info!(appended, total = persisted.state().len(), "replay finished");
    Ok(())
}
