//! HTML report generator for water conservation installation reports.
//!
//! Generates self-contained, print-ready HTML from consolidated installation
//! records and report form data.
//!
//! # Features
//!
//! - **Single-file output**: inline stylesheet, no external requests
//! - **Print layout**: every section starts a new printed page; controls are
//!   hidden when printing
//! - **Embedded branding**: `embed_assets` inlines logo, signature and footer
//!   images as data URIs
//!
//! # Sections
//!
//! - Cover: title, client, preparer, date
//! - Letter: introduction, fixed body, conclusion, sign-off
//! - Details: one table page per `rows_per_page` records
//! - Summary: unit count and next steps
//!
//! # Example
//!
//! ```no_run
//! use ir_common::{FormData, InstallationRecord};
//! use ir_report::{ReportConfig, ReportData, ReportGenerator};
//!
//! let form = FormData::from_json(r#"{"clientName":"Acme","preparedBy":"J. Doe",
//!     "reportDate":"2024-01-15","introduction":"","conclusion":""}"#).unwrap();
//! let records = vec![InstallationRecord::new().with("Unit", "101")];
//!
//! let config = ReportConfig::default();
//! let data = ReportData::build(&form, &records, &config).unwrap();
//! let html = ReportGenerator::new(config).generate(&data).unwrap();
//! ```

pub mod assets;
pub mod config;
pub mod error;
pub mod generator;
pub mod paginate;
pub mod sections;

pub use config::{
    Branding, EmptyDatasetPolicy, ReportConfig, ReportLimits, ReportRoutes, ReportTheme,
};
pub use error::{ReportError, Result};
pub use generator::{ReportData, ReportGenerator};
pub use paginate::paginate;
