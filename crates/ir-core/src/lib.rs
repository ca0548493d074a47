//! Installation report view pipeline.
//!
//! Wires the store, consolidation and report crates into one view:
//!
//! 1. [`view::ReportView::mount`] reads `installationData` and
//!    `reportFormData` from a [`ir_store::ReportStore`], consolidating the
//!    records once
//! 2. [`view::ReportView::render`] paginates and renders the printable report,
//!    an empty-state page, or nothing when the view redirected home
//!
//! The `ir-core` binary exposes the same pipeline over a file-backed store.

pub mod config;
pub mod exit_codes;
pub mod logging;
pub mod navigation;
pub mod view;

pub use config::{load_config, AppConfig, ConfigError, ConfigOptions, ResolvedConfig};
pub use exit_codes::ExitCode;
pub use navigation::{Control, HostEvent, RecordingHost, Route, ViewHost};
pub use view::{RedirectReason, ReportContext, ReportView, ViewOutcome, ViewState};
