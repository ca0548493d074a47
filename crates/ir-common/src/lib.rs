//! Installation report shared types.
//!
//! This crate provides the data model every other crate in the workspace
//! speaks:
//! - [`InstallationRecord`]: one schema-less row, keys kept in input order
//! - [`FormData`]: report metadata entered upstream (client, preparer, date, text)
//! - [`ColumnSet`]: the displayed columns, derived once from the first record
//! - [`OutputFormat`]: CLI payload format

pub mod columns;
pub mod error;
pub mod form;
pub mod output;
pub mod record;

pub use columns::{ColumnSet, ColumnSpec, DisplayType};
pub use error::{ModelError, Result};
pub use form::{FormData, ReportDate};
pub use output::OutputFormat;
pub use record::{CellValue, InstallationRecord};

/// Storage key holding the serialized installation rows.
pub const INSTALLATION_DATA_KEY: &str = "installationData";

/// Storage key holding the serialized report form.
pub const REPORT_FORM_KEY: &str = "reportFormData";
