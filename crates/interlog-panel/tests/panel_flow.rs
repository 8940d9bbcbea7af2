//! End-to-end panel flow over a JSON file store.
//!
//! Covers the host session lifecycle: events arrive, a row is inspected,
//! the panel reloads from disk, and the clear action resets everything.

#![allow(clippy::unwrap_used)]

use interlog_log::ReduceOutcome;
use interlog_panel::{Panel, PanelConfig, TerminalDetail, TerminalTable};
use interlog_store::{JsonFileStore, Persisted};
use interlog_types::{EventId, HostEnvelope, HostMessage};
use interlog_view::SearchQuery;

type FilePanel = Panel<JsonFileStore, TerminalTable<Vec<u8>>, TerminalDetail<Vec<u8>>>;

fn open(path: &std::path::Path, config: &PanelConfig) -> FilePanel {
    Panel::new(
        Persisted::open(JsonFileStore::new(path)).unwrap(),
        TerminalTable::new(Vec::new(), 120),
        TerminalDetail::new(Vec::new()),
        config.table.clone(),
    )
}

fn envelope(raw: &str) -> HostMessage {
    HostMessage::from(serde_json::from_str::<HostEnvelope>(raw).unwrap())
}

fn login(name: &str) -> HostMessage {
    envelope(&format!(
        r#"{{"method":"action","params":{{"level":"info","service":"auth","scope":"login","eventName":"{name}","message":"ok","data":{{"user":"u1"}},"time":"2024-05-01T10:00:00Z"}}}}"#
    ))
}

#[test]
fn session_survives_reload_and_clear_resets_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    let config = PanelConfig::parse("table:\n  title: Auth\n").unwrap();

    {
        let mut panel = open(&path, &config);
        assert_eq!(
            panel.receive(&login("UserLoggedIn")).unwrap(),
            ReduceOutcome::Appended(EventId::new(0))
        );
        assert_eq!(
            panel.receive(&login("UserLoggedOut")).unwrap(),
            ReduceOutcome::Appended(EventId::new(1))
        );
        panel.on_highlight(&[EventId::new(1)]);
        assert_eq!(panel.selection().selected_id(), Some(EventId::new(1)));
    }

    // Reload: the log is restored, the selection is not.
    let mut panel = open(&path, &config);
    assert_eq!(panel.log().len(), 2);
    assert_eq!(panel.selection().selected_id(), None);
    assert_eq!(
        panel.receive(&login("SessionExpired")).unwrap(),
        ReduceOutcome::Appended(EventId::new(2))
    );

    panel.clear().unwrap();
    assert!(panel.log().is_empty());

    let reloaded = open(&path, &config);
    assert!(reloaded.log().is_empty());
    assert_eq!(reloaded.rows().len(), 0);
}

#[test]
fn filtered_table_shows_configured_title_and_only_matches() {
    let dir = tempfile::tempdir().unwrap();
    let config = PanelConfig::parse("table:\n  title: Auth\n").unwrap();
    let mut panel = open(&dir.path().join("events.json"), &config);

    panel.receive(&login("UserLoggedIn")).unwrap();
    panel
        .receive(&envelope(
            r#"{"method":"action","params":{"level":"warn","service":"billing","scope":"invoice","eventName":"InvoiceFailed","message":"card declined","data":{},"time":"2024-05-01T10:01:00Z"}}"#,
        ))
        .unwrap();

    // Drop the live renders so only the filtered one is inspected.
    let (persisted, _, detail) = panel.into_parts();
    let mut panel = Panel::new(
        persisted,
        TerminalTable::new(Vec::new(), 120),
        detail,
        config.table.clone(),
    );
    panel.render_filtered(&SearchQuery::new().text("loggedin"));

    let (_, table, _) = panel.into_parts();
    let text = String::from_utf8(table.into_inner()).unwrap();
    assert!(text.starts_with("== Auth (1) =="), "unexpected output: {text}");
    assert!(text.contains("User Logged In"));
    assert!(!text.contains("Invoice Failed"));
    assert!(!text.contains("card declined"));
}

#[test]
fn unknown_and_malformed_messages_never_touch_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    let mut panel = open(&path, &PanelConfig::default());

    assert_eq!(
        panel.receive(&envelope(r#"{"method":"ping"}"#)).unwrap(),
        ReduceOutcome::Ignored
    );
    assert_eq!(
        panel
            .receive(&envelope(r#"{"method":"action","params":{"level":"info"}}"#))
            .unwrap(),
        ReduceOutcome::Rejected
    );
    assert!(!path.exists());
}
