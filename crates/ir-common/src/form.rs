//! Report form metadata.

use crate::error::{ModelError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Report metadata entered on the data form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    /// Client (property) name shown on the cover and letter.
    pub client_name: String,
    /// Person preparing the report.
    pub prepared_by: String,
    /// Report date.
    pub report_date: ReportDate,
    /// Letter introduction paragraph.
    pub introduction: String,
    /// Letter closing paragraph.
    pub conclusion: String,
}

impl FormData {
    /// Parse form JSON.
    ///
    /// Blank names are accepted here; see [`FormData::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check that the names entered on the form are filled in.
    ///
    /// Applied when the form is written. Introduction and conclusion are free
    /// text and may be empty.
    pub fn validate(&self) -> Result<()> {
        if self.client_name.trim().is_empty() {
            return Err(ModelError::BlankField("clientName"));
        }
        if self.prepared_by.trim().is_empty() {
            return Err(ModelError::BlankField("preparedBy"));
        }
        Ok(())
    }
}

/// A report date, kept alongside the string it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportDate {
    raw: String,
    date: NaiveDate,
}

impl ReportDate {
    /// Parse an ISO date (`2024-01-15`), an RFC 3339 timestamp, or a naive
    /// `YYYY-MM-DDTHH:MM:SS` timestamp.
    ///
    /// Timestamps keep their own calendar date; no timezone shift is applied.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(trimmed)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
            .or_else(|| {
                NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|dt| dt.date())
            })
            .ok_or_else(|| ModelError::InvalidDate {
                value: value.to_string(),
            })?;

        Ok(Self {
            raw: value.to_string(),
            date,
        })
    }

    /// Calendar date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Format with a strftime pattern, falling back to ISO on a bad pattern.
    pub fn format_with(&self, pattern: &str) -> String {
        let mut out = String::new();
        if write!(out, "{}", self.date.format(pattern)).is_err() {
            return self.date.format("%Y-%m-%d").to_string();
        }
        out
    }
}

impl TryFrom<String> for ReportDate {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        ReportDate::parse(&value)
    }
}

impl From<ReportDate> for String {
    fn from(date: ReportDate) -> Self {
        date.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "clientName": "Acme",
            "preparedBy": "J. Doe",
            "reportDate": "2024-01-15",
            "introduction": "Intro",
            "conclusion": "Thanks"
        }"#
    }

    #[test]
    fn test_parse_form() {
        let form = FormData::from_json(sample_json()).unwrap();
        assert_eq!(form.client_name, "Acme");
        assert_eq!(form.prepared_by, "J. Doe");
        assert_eq!(form.report_date.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_missing_field_fails() {
        let json = r#"{"clientName": "Acme", "preparedBy": "J. Doe", "reportDate": "2024-01-15"}"#;
        assert!(matches!(FormData::from_json(json), Err(ModelError::Json(_))));
    }

    #[test]
    fn test_null_field_fails() {
        let json = r#"{"clientName": null, "preparedBy": "J", "reportDate": "2024-01-15",
                       "introduction": "", "conclusion": ""}"#;
        assert!(FormData::from_json(json).is_err());
    }

    #[test]
    fn test_blank_client_parses_but_fails_validation() {
        let json = r#"{"clientName": "  ", "preparedBy": "J", "reportDate": "2024-01-15",
                       "introduction": "", "conclusion": ""}"#;
        let form = FormData::from_json(json).unwrap();
        assert!(matches!(
            form.validate(),
            Err(ModelError::BlankField("clientName"))
        ));
    }

    #[test]
    fn test_report_date_formats() {
        let d = ReportDate::parse("2024-01-15").unwrap();
        assert_eq!(d.format_with("%-m/%-d/%Y"), "1/15/2024");

        let d = ReportDate::parse("2024-03-05T10:30:00Z").unwrap();
        assert_eq!(d.format_with("%Y-%m-%d"), "2024-03-05");

        let d = ReportDate::parse("2024-03-05T23:30:00.123").unwrap();
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_report_date_invalid() {
        assert!(matches!(
            ReportDate::parse("next tuesday"),
            Err(ModelError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_report_date_roundtrips_raw() {
        let form = FormData::from_json(sample_json()).unwrap();
        let json = form.to_json().unwrap();
        assert!(json.contains(r#""reportDate":"2024-01-15""#));
    }

    #[test]
    fn test_bad_pattern_falls_back() {
        let d = ReportDate::parse("2024-01-15").unwrap();
        assert_eq!(d.format_with("%Q"), "2024-01-15");
    }
}
