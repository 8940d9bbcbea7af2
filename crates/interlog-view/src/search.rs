//! Row search: one free-text term plus optional per-column terms.
//!
//! The free-text term is matched against a row's composite filter value
//! (service and event name), so a single search box finds events by either
//! field whichever columns are visible. Column terms are matched against
//! that column's own filter value. Matching is a case-insensitive substring
//! test and every non-empty term must match.

use std::collections::BTreeMap;

use crate::columns::ColumnKey;
use crate::projector::Row;

/// A search over projected rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    columns: BTreeMap<ColumnKey, String>,
}

impl SearchQuery {
    /// A query that matches every row.
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            columns: BTreeMap::new(),
        }
    }

    /// Set the free-text term.
    #[must_use]
    pub fn text(mut self, term: &str) -> Self {
        self.text = term.trim().to_lowercase();
        self
    }

    /// Add a term scoped to one column, replacing any earlier term for it.
    #[must_use]
    pub fn column(mut self, key: ColumnKey, term: &str) -> Self {
        self.columns.insert(key, term.trim().to_lowercase());
        self
    }

    /// Whether the query has no non-empty terms.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.columns.values().all(String::is_empty)
    }

    /// Whether `row` satisfies every term.
    pub fn matches(&self, row: &Row) -> bool {
        contains(&row.filter_value, &self.text)
            && self
                .columns
                .iter()
                .all(|(key, term)| contains(&row.cell(*key).filter_value, term))
    }

    /// Keep the rows that match, preserving their order.
    pub fn filter<'a>(&self, rows: &'a [Row]) -> Vec<&'a Row> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}

/// Case-insensitive substring test; an empty term always matches.
fn contains(haystack: &str, lowered_term: &str) -> bool {
    lowered_term.is_empty() || haystack.to_lowercase().contains(lowered_term)
}
