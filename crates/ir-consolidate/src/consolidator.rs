//! Row consolidation strategies.

use crate::unit::{find_unit_column, normalize_unit};
use ir_common::{CellValue, InstallationRecord};
use std::collections::HashMap;
use tracing::debug;

/// Column names recognised as the unit identifier, compared case-insensitively.
pub const DEFAULT_UNIT_COLUMNS: &[&str] = &[
    "Unit",
    "Unit #",
    "Unit Number",
    "Unit No",
    "Apt",
    "Apartment",
];

/// Turns raw installation rows into report rows.
///
/// Implementations must be pure and total: same input, same output, never fail.
pub trait Consolidator {
    /// Consolidate rows, preserving first-appearance order.
    fn consolidate(&self, rows: Vec<InstallationRecord>) -> Vec<InstallationRecord>;
}

/// Returns rows unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Consolidator for Passthrough {
    fn consolidate(&self, rows: Vec<InstallationRecord>) -> Vec<InstallationRecord> {
        rows
    }
}

/// Merges rows that refer to the same unit.
///
/// - The unit column is the first key of the first row matching a candidate
///   name; without one, rows pass through unchanged.
/// - Unit values are normalised ([`normalize_unit`]) before grouping, so
///   `"101"` and `"101 (2)"` land in the same group.
/// - Within a group the first non-blank value per column wins; columns keep
///   the order in which they first appear across the group.
/// - Rows with a blank unit value are never merged.
#[derive(Debug, Clone)]
pub struct UnitConsolidator {
    unit_columns: Vec<String>,
}

impl Default for UnitConsolidator {
    fn default() -> Self {
        Self::new(DEFAULT_UNIT_COLUMNS.iter().map(|s| s.to_string()).collect())
    }
}

impl UnitConsolidator {
    /// Create a consolidator with custom unit column candidates.
    pub fn new(unit_columns: Vec<String>) -> Self {
        Self { unit_columns }
    }

    /// Unit column candidates.
    pub fn unit_columns(&self) -> &[String] {
        &self.unit_columns
    }
}

impl Consolidator for UnitConsolidator {
    fn consolidate(&self, rows: Vec<InstallationRecord>) -> Vec<InstallationRecord> {
        let unit_key = match rows
            .first()
            .and_then(|first| find_unit_column(first, &self.unit_columns))
        {
            Some(key) => key.to_string(),
            None => {
                debug!(rows = rows.len(), "No unit column found; rows unchanged");
                return rows;
            }
        };

        let input_rows = rows.len();
        let mut merged: Vec<InstallationRecord> = Vec::new();
        let mut index_by_unit: HashMap<String, usize> = HashMap::new();

        for row in rows {
            let unit = row
                .get(&unit_key)
                .map(|v| normalize_unit(&v.display_text()))
                .unwrap_or_default();

            if unit.is_empty() {
                merged.push(row);
                continue;
            }

            match index_by_unit.get(&unit) {
                Some(&idx) => merge_into(&mut merged[idx], &row),
                None => {
                    let mut first = row;
                    normalize_unit_cell(&mut first, &unit_key, &unit);
                    index_by_unit.insert(unit, merged.len());
                    merged.push(first);
                }
            }
        }

        debug!(
            unit_column = %unit_key,
            input_rows,
            output_rows = merged.len(),
            "Rows consolidated by unit"
        );

        merged
    }
}

/// Fill blank or absent columns of `target` from `source`.
fn merge_into(target: &mut InstallationRecord, source: &InstallationRecord) {
    for (key, value) in source.iter() {
        if value.is_blank() {
            if target.get(key).is_none() {
                target.insert(key, value.clone());
            }
            continue;
        }
        let fill = target.get(key).map(CellValue::is_blank).unwrap_or(true);
        if fill {
            target.insert(key, value.clone());
        }
    }
}

/// Rewrite the unit cell when normalisation changed its text.
fn normalize_unit_cell(record: &mut InstallationRecord, unit_key: &str, unit: &str) {
    let changed = record
        .get(unit_key)
        .map(|v| v.display_text() != unit)
        .unwrap_or(false);
    if changed {
        record.insert(unit_key, unit.to_string());
    }
}
