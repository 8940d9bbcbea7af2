//! The fixed column schema handed to the table widget.
//!
//! The table always shows the same five columns in the same order. Only
//! their widths are configurable, and by default exactly two columns carry
//! a width: `level` is a narrow fixed column and `eventName` takes the
//! remaining space.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifies one table column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum ColumnKey {
    /// Event severity.
    Level,
    /// Event scope.
    Scope,
    /// Formatted event name.
    EventName,
    /// Event message.
    Message,
    /// Event data as `key = value` lines.
    Data,
}

impl ColumnKey {
    /// All columns, in display order.
    pub const ALL: [Self; 5] = [
        Self::Level,
        Self::Scope,
        Self::EventName,
        Self::Message,
        Self::Data,
    ];

    /// Header label shown above the column.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Level => "Level",
            Self::Scope => "Scope",
            Self::EventName => "Event",
            Self::Message => "Message",
            Self::Data => "Details",
        }
    }

    /// Key as it appears on the wire and in configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::Scope => "scope",
            Self::EventName => "eventName",
            Self::Message => "message",
            Self::Data => "data",
        }
    }
}

impl core::fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a column width cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid column size {0:?}: expected \"flex\" or a percentage like \"15%\"")]
pub struct ColumnSizeError(pub String);

/// Relative width of a column.
///
/// Written as `"NN%"` (1 to 100) or `"flex"` in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColumnSize {
    /// A fixed share of the table width, in percent.
    Percent(u8),
    /// Takes whatever width is left.
    Flex,
}

impl FromStr for ColumnSize {
    type Err = ColumnSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("flex") {
            return Ok(Self::Flex);
        }
        trimmed
            .strip_suffix('%')
            .and_then(|n| n.trim().parse::<u8>().ok())
            .filter(|n| (1..=100).contains(n))
            .map(Self::Percent)
            .ok_or_else(|| ColumnSizeError(s.to_owned()))
    }
}

impl TryFrom<String> for ColumnSize {
    type Error = ColumnSizeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ColumnSize> for String {
    fn from(size: ColumnSize) -> Self {
        size.to_string()
    }
}

impl core::fmt::Display for ColumnSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Percent(n) => write!(f, "{n}%"),
            Self::Flex => f.write_str("flex"),
        }
    }
}

/// Default widths: a narrow fixed `level` column and a flexible
/// `eventName` column.
pub fn default_column_sizes() -> BTreeMap<ColumnKey, ColumnSize> {
    BTreeMap::from([
        (ColumnKey::Level, ColumnSize::Percent(15)),
        (ColumnKey::EventName, ColumnSize::Flex),
    ])
}

/// One column as described to the table widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Column {
    /// Column identifier.
    pub key: ColumnKey,
    /// Header label.
    pub label: String,
    /// Configured width; `None` lets the widget decide.
    #[ts(type = "string | null")]
    pub size: Option<ColumnSize>,
}

/// The ordered set of columns shown by the table widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSchema {
    columns: Vec<Column>,
}

impl ColumnSchema {
    /// Build the schema with the given widths. Columns missing from `sizes`
    /// get no explicit width.
    pub fn new(sizes: &BTreeMap<ColumnKey, ColumnSize>) -> Self {
        let columns = ColumnKey::ALL
            .iter()
            .map(|&key| Column {
                key,
                label: key.label().to_owned(),
                size: sizes.get(&key).copied(),
            })
            .collect();
        Self { columns }
    }

    /// Return the columns in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self::new(&default_column_sizes())
    }
}
