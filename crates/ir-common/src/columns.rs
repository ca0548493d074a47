//! Displayed column specifications.

use crate::record::InstallationRecord;
use serde::{Deserialize, Serialize};

/// How a column's values are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    /// Free text, left aligned.
    #[default]
    Text,
    /// Numeric, right aligned.
    Number,
    /// Yes/No flag, centered.
    Boolean,
    /// No sample value in the first record.
    Empty,
}

impl DisplayType {
    /// CSS alignment class for table cells.
    pub fn align_class(&self) -> &'static str {
        match self {
            DisplayType::Number => "text-right",
            DisplayType::Boolean => "text-center",
            DisplayType::Text | DisplayType::Empty => "text-left",
        }
    }
}

/// A single displayed column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Record key used as the header and lookup.
    pub key: String,
    /// Presentation derived from the first record's value.
    pub display: DisplayType,
}

/// Ordered set of displayed columns.
///
/// Derived once from the first record of the whole dataset and applied to
/// every page. Records lacking one of these keys render a blank cell; keys
/// that only appear on later records are not shown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnSet {
    columns: Vec<ColumnSpec>,
}

impl ColumnSet {
    /// Take the first `max_columns` keys of the first record.
    pub fn from_first_record(records: &[InstallationRecord], max_columns: usize) -> Self {
        let columns = records
            .first()
            .map(|first| {
                first
                    .iter()
                    .take(max_columns)
                    .map(|(key, value)| ColumnSpec {
                        key: key.to_string(),
                        display: value.display_type(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { columns }
    }

    /// Column specs in display order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter()
    }

    /// Header keys in display order.
    pub fn keys(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.key.as_str()).collect()
    }

    /// Cell texts for one record, in column order.
    pub fn row_cells(&self, record: &InstallationRecord) -> Vec<String> {
        self.columns.iter().map(|c| record.cell_text(&c.key)).collect()
    }

    /// Number of records missing at least one displayed key.
    pub fn rows_missing_keys(&self, records: &[InstallationRecord]) -> usize {
        records
            .iter()
            .filter(|r| self.columns.iter().any(|c| r.get(&c.key).is_none()))
            .count()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no columns are displayed.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
