//! Report store reader/writer for installation reports.
//!
//! The report view never touches ambient storage. Upstream steps write two
//! serialized values into a [`ReportStore`]; the view receives the store
//! explicitly and reads both values once through [`StoreReader`].
//!
//! # Keys
//!
//! - `installationData`: JSON array of row objects
//! - `reportFormData`: JSON object with `clientName`, `preparedBy`,
//!   `reportDate`, `introduction`, `conclusion`
//!
//! # Example
//!
//! ```no_run
//! use ir_store::{FileStore, StoreReader, StoreWriter};
//! use std::path::Path;
//!
//! let mut store = FileStore::open(Path::new("report-store.json")).unwrap();
//! StoreWriter::new(&mut store)
//!     .write_records_json(r#"[{"Unit": "101", "Toilet": 1}]"#)
//!     .unwrap();
//!
//! let input = StoreReader::new(&store).load().unwrap();
//! println!("{} raw rows", input.records.len());
//! ```

pub mod error;
pub mod reader;
pub mod store;
pub mod writer;

pub use error::{LoadError, Result, StoreError};
pub use ir_common::{INSTALLATION_DATA_KEY, REPORT_FORM_KEY};
pub use reader::{ReportInput, StoreReader};
pub use store::{FileStore, MemoryStore, ReportStore};
pub use writer::StoreWriter;
