//! Fuzz target for installation row parsing and unit consolidation.

#![no_main]

use ir_common::InstallationRecord;
use ir_consolidate::{Consolidator, UnitConsolidator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(records) = serde_json::from_slice::<Vec<InstallationRecord>>(data) else {
        return;
    };
    let consolidator = UnitConsolidator::default();
    let once = consolidator.consolidate(records);
    let twice = consolidator.consolidate(once.clone());
    assert_eq!(once.len(), twice.len());
});
