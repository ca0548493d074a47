//! Typed load boundary for report inputs.
//!
//! Reads both stored values once and converts every absence or shape problem
//! into a single [`LoadError`].

use crate::{LoadError, ReportStore};
use ir_common::{FormData, InstallationRecord, INSTALLATION_DATA_KEY, REPORT_FORM_KEY};
use tracing::{debug, info, warn};

/// Parsed report inputs, before consolidation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInput {
    /// Raw installation rows in stored order.
    pub records: Vec<InstallationRecord>,
    /// Report metadata.
    pub form: FormData,
}

/// Reader over a report store.
pub struct StoreReader<'a> {
    store: &'a dyn ReportStore,
}

impl<'a> StoreReader<'a> {
    /// Create a reader over any store backend.
    pub fn new(store: &'a dyn ReportStore) -> Self {
        Self { store }
    }

    /// Read and parse both report values.
    ///
    /// Presence of both keys is checked before either is parsed.
    pub fn load(&self) -> Result<ReportInput, LoadError> {
        let raw_records = self.require(INSTALLATION_DATA_KEY)?;
        let raw_form = self.require(REPORT_FORM_KEY)?;

        let records: Vec<InstallationRecord> =
            serde_json::from_str(&raw_records).map_err(|e| {
                warn!(key = INSTALLATION_DATA_KEY, error = %e, "Stored value failed to parse");
                LoadError::ParseFailure {
                    key: INSTALLATION_DATA_KEY,
                    reason: e.to_string(),
                }
            })?;

        let form = FormData::from_json(&raw_form).map_err(|e| {
            warn!(key = REPORT_FORM_KEY, error = %e, "Stored value failed to parse");
            LoadError::ParseFailure {
                key: REPORT_FORM_KEY,
                reason: e.to_string(),
            }
        })?;

        info!(
            records = records.len(),
            client = %form.client_name,
            "Report input loaded"
        );

        Ok(ReportInput { records, form })
    }

    fn require(&self, key: &'static str) -> Result<String, LoadError> {
        match self.store.get(key)? {
            Some(value) => {
                debug!(key, bytes = value.len(), "Stored value read");
                Ok(value)
            }
            None => {
                warn!(key, "Stored value missing");
                Err(LoadError::MissingData { key })
            }
        }
    }
}
