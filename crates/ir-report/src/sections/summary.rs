//! Summary page data.

use serde::{Deserialize, Serialize};

/// Environmental impact paragraph.
pub const ENVIRONMENTAL_IMPACT: &str = "The water-efficient fixtures installed in this \
project will result in significant water conservation. These improvements contribute to \
environmental sustainability while providing long-term cost savings for the property.";

/// Closing summary page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySection {
    /// Consolidated record count.
    pub total_units: usize,
    /// Completion percentage; always 100 for a rendered report.
    pub completion_pct: u8,
    /// Environmental impact text.
    pub environmental_impact: String,
    /// Next steps bullets.
    pub next_steps: Vec<String>,
}

impl SummarySection {
    /// Build the summary for `total_units` consolidated records.
    pub fn new(total_units: usize, company_name: &str) -> Self {
        Self {
            total_units,
            completion_pct: 100,
            environmental_impact: ENVIRONMENTAL_IMPACT.to_string(),
            next_steps: vec![
                "Monitor water usage over the next billing cycle".to_string(),
                format!("Report any issues or concerns to {}", company_name),
                "Schedule annual maintenance check-ups as recommended".to_string(),
                "Consider additional water conservation measures for future phases".to_string(),
            ],
        }
    }
}
