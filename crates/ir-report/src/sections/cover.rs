//! Cover page data.

use ir_common::FormData;
use serde::{Deserialize, Serialize};

/// Title page: report title, client, preparer and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverSection {
    /// Report title.
    pub report_title: String,
    /// Client name.
    pub client_name: String,
    /// Preparer.
    pub prepared_by: String,
    /// Report date, already formatted for display.
    pub report_date: String,
}

impl CoverSection {
    /// Build the cover from form data.
    pub fn from_form(form: &FormData, report_title: &str, date_format: &str) -> Self {
        Self {
            report_title: report_title.to_string(),
            client_name: form.client_name.clone(),
            prepared_by: form.prepared_by.clone(),
            report_date: form.report_date.format_with(date_format),
        }
    }
}
