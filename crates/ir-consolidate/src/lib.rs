//! Consolidation of raw installation rows into one row per unit.
//!
//! Spreadsheet exports list a unit once per installed fixture and sometimes
//! tag repeats with a ` (2)` suffix. [`UnitConsolidator`] groups rows by the
//! normalised unit value and merges each group into a single record.
//!
//! The [`Consolidator`] trait is the only surface the report view depends on:
//! a pure, total function from rows to rows.

pub mod consolidator;
pub mod unit;

pub use consolidator::{Consolidator, Passthrough, UnitConsolidator, DEFAULT_UNIT_COLUMNS};
pub use unit::{find_unit_column, normalize_unit};
