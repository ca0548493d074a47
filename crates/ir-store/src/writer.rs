//! Upstream writer for report inputs.
//!
//! Values go through the same parsers the reader uses, so nothing the reader
//! would reject can be persisted through this path. Form names are also
//! required to be non-blank here.

use crate::{ReportStore, Result, StoreError};
use ir_common::{
    FormData, InstallationRecord, ModelError, INSTALLATION_DATA_KEY, REPORT_FORM_KEY,
};
use tracing::info;

/// Writer for the two report keys.
pub struct StoreWriter<'a> {
    store: &'a mut dyn ReportStore,
}

impl<'a> StoreWriter<'a> {
    /// Create a writer over any store backend.
    pub fn new(store: &'a mut dyn ReportStore) -> Self {
        Self { store }
    }

    /// Persist installation rows.
    pub fn write_records(&mut self, records: &[InstallationRecord]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.store.set(INSTALLATION_DATA_KEY, json)?;
        info!(records = records.len(), "Installation data stored");
        Ok(())
    }

    /// Validate and persist installation rows given as JSON text.
    pub fn write_records_json(&mut self, json: &str) -> Result<usize> {
        let records: Vec<InstallationRecord> =
            serde_json::from_str(json).map_err(|e| StoreError::InvalidValue {
                key: INSTALLATION_DATA_KEY,
                source: ModelError::Json(e),
            })?;
        self.write_records(&records)?;
        Ok(records.len())
    }

    /// Persist report form data.
    pub fn write_form(&mut self, form: &FormData) -> Result<()> {
        form.validate().map_err(|e| StoreError::InvalidValue {
            key: REPORT_FORM_KEY,
            source: e,
        })?;
        let json = serde_json::to_string(form)?;
        self.store.set(REPORT_FORM_KEY, json)?;
        info!(client = %form.client_name, "Report form stored");
        Ok(())
    }

    /// Validate and persist report form data given as JSON text.
    pub fn write_form_json(&mut self, json: &str) -> Result<FormData> {
        let form = FormData::from_json(json).map_err(|e| StoreError::InvalidValue {
            key: REPORT_FORM_KEY,
            source: e,
        })?;
        self.write_form(&form)?;
        Ok(form)
    }

    /// Remove both report keys.
    pub fn clear(&mut self) -> Result<usize> {
        let mut removed = 0;
        for key in [INSTALLATION_DATA_KEY, REPORT_FORM_KEY] {
            if self.store.remove(key)?.is_some() {
                removed += 1;
            }
        }
        info!(removed, "Report keys cleared");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, StoreReader};

    #[test]
    fn test_write_then_read() {
        let mut store = MemoryStore::new();
        let mut writer = StoreWriter::new(&mut store);
        let n = writer
            .write_records_json(r#"[{"Unit":"101","Toilet":1}]"#)
            .unwrap();
        assert_eq!(n, 1);
        writer
            .write_form_json(
                r#"{"clientName":"Acme","preparedBy":"J. Doe","reportDate":"2024-01-15",
                    "introduction":"","conclusion":""}"#,
            )
            .unwrap();

        let input = StoreReader::new(&store).load().unwrap();
        assert_eq!(input.records[0].cell_text("Toilet"), "1");
    }

    #[test]
    fn test_invalid_records_not_written() {
        let mut store = MemoryStore::new();
        let err = StoreWriter::new(&mut store)
            .write_records_json("{}")
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidValue {
                key: INSTALLATION_DATA_KEY,
                ..
            }
        ));
        assert!(store.get(INSTALLATION_DATA_KEY).unwrap().is_none());
    }

    #[test]
    fn test_blank_client_name_not_written() {
        let mut store = MemoryStore::new();
        let err = StoreWriter::new(&mut store)
            .write_form_json(
                r#"{"clientName":"","preparedBy":"J","reportDate":"2024-01-15",
                    "introduction":"","conclusion":""}"#,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidValue {
                key: REPORT_FORM_KEY,
                source: ModelError::BlankField("clientName"),
            }
        ));
        assert!(store.get(REPORT_FORM_KEY).unwrap().is_none());
    }

    #[test]
    fn test_clear_counts_removed() {
        let mut store = MemoryStore::new().with(INSTALLATION_DATA_KEY, "[]");
        assert_eq!(StoreWriter::new(&mut store).clear().unwrap(), 1);
        assert!(store.keys().unwrap().is_empty());
    }
}
