//! Selection state for the detail panel.
//!
//! The table reports the full set of highlighted row keys on every change.
//! [`Selection`] reduces that report into either nothing or exactly one
//! event, resolved against the current log:
//!
//! | From | Highlight | To |
//! |------|-----------|----|
//! | any | no ids, or more than one | `Empty` |
//! | `Selected(id)` | `{id}` again | `Empty` (toggle off) |
//! | any other | `{id}`, found in the log | `Selected(id)` |
//! | any | `{id}`, not in the log | `Empty` |
//!
//! Selection is never persisted and is cleared together with the log.

use std::collections::BTreeSet;

use interlog_log::EventLog;
use interlog_types::{Event, EventId};
use tracing::debug;

/// The event, if any, whose details are shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing is selected.
    #[default]
    Empty,
    /// One event is selected; `snapshot` is the event as it was resolved.
    Selected {
        /// Id of the selected event.
        id: EventId,
        /// The resolved event, shown by the detail panel.
        snapshot: Box<Event>,
    },
}

impl Selection {
    /// Start with nothing selected.
    pub const fn new() -> Self {
        Self::Empty
    }

    /// Reduce a highlight report from the table into the next selection.
    ///
    /// Duplicate keys in `ids` count once.
    #[must_use]
    pub fn on_highlight(self, ids: &[EventId], log: &EventLog) -> Self {
        let highlighted: BTreeSet<EventId> = ids.iter().copied().collect();
        let mut keys = highlighted.iter();
        let (Some(&id), None) = (keys.next(), keys.next()) else {
            debug!(count = highlighted.len(), "highlight is not a single row, clearing selection");
            return Self::Empty;
        };

        if self.selected_id() == Some(id) {
            debug!(id = %id, "row highlighted again, clearing selection");
            return Self::Empty;
        }

        match log.by_id(id) {
            Some(event) => {
                debug!(id = %id, "row selected");
                Self::Selected {
                    id,
                    snapshot: Box::new(event.clone()),
                }
            }
            None => {
                debug!(id = %id, "highlighted id not in log, clearing selection");
                Self::Empty
            }
        }
    }

    /// Drop any selection.
    #[must_use]
    pub fn clear(self) -> Self {
        Self::Empty
    }

    /// Return the id of the selected event, if any.
    pub const fn selected_id(&self) -> Option<EventId> {
        match self {
            Self::Empty => None,
            Self::Selected { id, .. } => Some(*id),
        }
    }

    /// Return the event the detail panel should show, if any.
    pub fn detail(&self) -> Option<&Event> {
        match self {
            Self::Empty => None,
            Self::Selected { snapshot, .. } => Some(snapshot.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn log_with(count: usize) -> EventLog {
        (0..count).fold(EventLog::new(), |log, n| {
            log.append(&json!({
                "level": "info", "service": "auth", "scope": "login",
                "eventName": format!("Event{n}"), "message": "ok",
                "data": {}, "time": "2024-05-01T10:00:00Z"
            }))
        })
    }

    fn ids(raw: &[u64]) -> Vec<EventId> {
        raw.iter().copied().map(EventId::new).collect()
    }

    #[test]
    fn starts_empty() {
        let selection = Selection::new();
        assert_eq!(selection, Selection::Empty);
        assert!(selection.detail().is_none());
    }

    #[test]
    fn single_resolvable_id_selects_it() {
        let log = log_with(2);
        let selection = Selection::new().on_highlight(&ids(&[0]), &log);
        assert_eq!(selection.selected_id(), Some(EventId::FIRST));
        assert_eq!(
            selection.detail().map(|e| e.event_name.as_str()),
            Some("Event0")
        );
    }

    #[test]
    fn same_id_twice_toggles_off() {
        let log = log_with(2);
        let selection = Selection::new()
            .on_highlight(&ids(&[0]), &log)
            .on_highlight(&ids(&[0]), &log);
        assert_eq!(selection, Selection::Empty);
    }

    #[test]
    fn different_id_moves_selection() {
        let log = log_with(2);
        let selection = Selection::new()
            .on_highlight(&ids(&[0]), &log)
            .on_highlight(&ids(&[1]), &log);
        assert_eq!(selection.selected_id(), Some(EventId::new(1)));
    }

    #[test]
    fn unknown_id_clears_selection() {
        let log = log_with(2);
        assert_eq!(Selection::new().on_highlight(&ids(&[5]), &log), Selection::Empty);

        let selected = Selection::new().on_highlight(&ids(&[1]), &log);
        assert_eq!(selected.on_highlight(&ids(&[5]), &log), Selection::Empty);
    }

    #[test]
    fn empty_or_multiple_ids_clear_selection() {
        let log = log_with(3);
        let selected = Selection::new().on_highlight(&ids(&[1]), &log);

        assert_eq!(selected.clone().on_highlight(&[], &log), Selection::Empty);
        assert_eq!(selected.on_highlight(&ids(&[0, 2]), &log), Selection::Empty);
    }

    #[test]
    fn duplicate_keys_count_once() {
        let log = log_with(1);
        let selection = Selection::new().on_highlight(&ids(&[0, 0]), &log);
        assert_eq!(selection.selected_id(), Some(EventId::FIRST));
    }

    #[test]
    fn stale_id_after_log_clear_resolves_to_empty() {
        let log = log_with(1);
        let selection = Selection::new().on_highlight(&ids(&[0]), &log);
        let log = log.clear();
        // Re-highlighting a different stale id must not resolve.
        assert_eq!(selection.on_highlight(&ids(&[3]), &log), Selection::Empty);
    }

    #[test]
    fn clear_always_empties() {
        let log = log_with(1);
        let selection = Selection::new().on_highlight(&ids(&[0]), &log).clear();
        assert_eq!(selection, Selection::Empty);
        assert_eq!(Selection::new().clear(), Selection::Empty);
    }
}
