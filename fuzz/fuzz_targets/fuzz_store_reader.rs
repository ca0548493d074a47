//! Fuzz target for the full view pipeline over stored strings.
//!
//! Arbitrary values under both report keys must either fail to load or
//! render; nothing may panic.

#![no_main]

use arbitrary::Arbitrary;
use ir_consolidate::{Consolidator, UnitConsolidator};
use ir_report::{ReportConfig, ReportData, ReportGenerator};
use ir_store::{MemoryStore, StoreReader, INSTALLATION_DATA_KEY, REPORT_FORM_KEY};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct StoredValues {
    records: Option<String>,
    form: Option<String>,
}

fuzz_target!(|input: StoredValues| {
    let mut store = MemoryStore::new();
    if let Some(records) = input.records {
        store = store.with(INSTALLATION_DATA_KEY, records);
    }
    if let Some(form) = input.form {
        store = store.with(REPORT_FORM_KEY, form);
    }

    let Ok(loaded) = StoreReader::new(&store).load() else {
        return;
    };
    let records = UnitConsolidator::default().consolidate(loaded.records);

    let config = ReportConfig::default();
    if let Ok(data) = ReportData::build(&loaded.form, &records, &config) {
        let _ = ReportGenerator::new(config).generate(&data);
    }
});
