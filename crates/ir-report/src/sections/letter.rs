//! Cover letter data.

use ir_common::FormData;
use serde::{Deserialize, Serialize};

/// Fixed paragraph between the introduction and the conclusion.
pub const LETTER_BODY: &str = "This report details the water conservation installations \
completed at your property. Our team has successfully installed water-efficient fixtures \
that will provide significant water and cost savings over time.";

/// Letter page addressed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterSection {
    /// Formatted report date.
    pub date: String,
    /// Addressee.
    pub client_name: String,
    /// Heading.
    pub report_title: String,
    /// Opening paragraph from the form.
    pub introduction: String,
    /// Boilerplate body.
    pub body: String,
    /// Closing paragraph from the form.
    pub conclusion: String,
    /// Signatory.
    pub prepared_by: String,
    /// Company under the signature.
    pub company_name: String,
}

impl LetterSection {
    /// Build the letter from form data.
    pub fn from_form(
        form: &FormData,
        report_title: &str,
        company_name: &str,
        date_format: &str,
    ) -> Self {
        Self {
            date: form.report_date.format_with(date_format),
            client_name: form.client_name.clone(),
            report_title: report_title.to_string(),
            introduction: form.introduction.clone(),
            body: LETTER_BODY.to_string(),
            conclusion: form.conclusion.clone(),
            prepared_by: form.prepared_by.clone(),
            company_name: company_name.to_string(),
        }
    }
}
