//! Fuzz target for report configuration parsing.
//!
//! Tests that JSON report configuration parsing and validation handle
//! arbitrary input without panicking.

#![no_main]

use ir_report::ReportConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = serde_json::from_slice::<ReportConfig>(data) {
        let _ = config.validate();
    }
});
