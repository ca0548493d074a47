//! Report configuration types.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Schema version for report configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";

/// Screen color theme. Printing always uses the light palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTheme {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
    /// Follow the system preference.
    Auto,
}

impl ReportTheme {
    /// CSS class for the `<html>` element.
    pub fn css_class(&self) -> &'static str {
        match self {
            ReportTheme::Light => "light",
            ReportTheme::Dark => "dark",
            ReportTheme::Auto => "",
        }
    }
}

/// What the view does when the data loads but consolidates to zero rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyDatasetPolicy {
    /// Render a "No data found" page and stay.
    #[default]
    Placeholder,
    /// Navigate to the home route, like missing data.
    Redirect,
}

/// Company identity printed on the cover, letter and footers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branding {
    /// Report title on cover and letter.
    #[serde(default = "default_report_title")]
    pub report_title: String,
    /// Company name in the letterhead and sign-off.
    #[serde(default = "default_company_name")]
    pub company_name: String,
    /// Letterhead tagline.
    #[serde(default = "default_tagline")]
    pub tagline: String,
    /// Letterhead contact address.
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
    /// Accent color for headings and table headers.
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
    /// Logo image.
    #[serde(default)]
    pub logo_path: Option<PathBuf>,
    /// Signature image under the letter sign-off.
    #[serde(default)]
    pub signature_path: Option<PathBuf>,
    /// Full-width footer image.
    #[serde(default)]
    pub footer_path: Option<PathBuf>,
}

fn default_report_title() -> String {
    "Water Conservation Installation Report".to_string()
}

fn default_company_name() -> String {
    "Greenlight Water Solutions".to_string()
}

fn default_tagline() -> String {
    "Water Conservation Specialists".to_string()
}

fn default_contact_email() -> String {
    "info@greenlight.com".to_string()
}

fn default_accent_color() -> String {
    "#28a745".to_string()
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            report_title: default_report_title(),
            company_name: default_company_name(),
            tagline: default_tagline(),
            contact_email: default_contact_email(),
            accent_color: default_accent_color(),
            logo_path: None,
            signature_path: None,
            footer_path: None,
        }
    }
}

/// Navigation targets for the report controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRoutes {
    /// Home / upload route.
    #[serde(default = "default_home_route")]
    pub home: String,
    /// Data form (edit info) route.
    #[serde(default = "default_edit_route")]
    pub edit: String,
}

fn default_home_route() -> String {
    "/".to_string()
}

fn default_edit_route() -> String {
    "/data-form".to_string()
}

impl Default for ReportRoutes {
    fn default() -> Self {
        Self {
            home: default_home_route(),
            edit: default_edit_route(),
        }
    }
}

/// Layout and resource limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportLimits {
    /// Records per detail page.
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,
    /// Columns shown in detail tables.
    #[serde(default = "default_max_columns")]
    pub max_columns: usize,
    /// Maximum size for embedded assets (MB).
    #[serde(default = "default_embed_size_limit")]
    pub embed_size_limit_mb: u64,
}

fn default_rows_per_page() -> usize {
    15
}

fn default_max_columns() -> usize {
    8
}

fn default_embed_size_limit() -> u64 {
    10
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            rows_per_page: default_rows_per_page(),
            max_columns: default_max_columns(),
            embed_size_limit_mb: default_embed_size_limit(),
        }
    }
}

/// Complete report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Override for the HTML `<title>`.
    #[serde(default)]
    pub title: Option<String>,
    /// strftime pattern for displayed dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Screen theme.
    #[serde(default)]
    pub theme: ReportTheme,
    /// Company identity.
    #[serde(default)]
    pub branding: Branding,
    /// Control targets.
    #[serde(default)]
    pub routes: ReportRoutes,
    /// Layout limits.
    #[serde(default)]
    pub limits: ReportLimits,
    /// Behaviour for an empty consolidated dataset.
    #[serde(default)]
    pub empty_dataset: EmptyDatasetPolicy,
    /// Inline image assets as data URIs.
    #[serde(default)]
    pub embed_assets: bool,
    /// Open the print dialog when the page loads.
    #[serde(default)]
    pub auto_print: bool,
}

fn default_schema_version() -> String {
    CONFIG_SCHEMA_VERSION.to_string()
}

fn default_date_format() -> String {
    "%-m/%-d/%Y".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            title: None,
            date_format: default_date_format(),
            theme: ReportTheme::default(),
            branding: Branding::default(),
            routes: ReportRoutes::default(),
            limits: ReportLimits::default(),
            empty_dataset: EmptyDatasetPolicy::default(),
            embed_assets: false,
            auto_print: false,
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the screen theme.
    pub fn with_theme(mut self, theme: ReportTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Set records per detail page.
    pub fn with_rows_per_page(mut self, rows: usize) -> Self {
        self.limits.rows_per_page = rows;
        self
    }

    /// Set the empty-dataset policy.
    pub fn with_empty_dataset(mut self, policy: EmptyDatasetPolicy) -> Self {
        self.empty_dataset = policy;
        self
    }

    /// Enable asset embedding.
    pub fn with_embed_assets(mut self, embed: bool) -> Self {
        self.embed_assets = embed;
        self
    }

    /// Open the print dialog on load.
    pub fn with_auto_print(mut self, enabled: bool) -> Self {
        self.auto_print = enabled;
        self
    }

    /// Reject values that cannot produce a report.
    pub fn validate(&self) -> Result<()> {
        if self.schema_version != CONFIG_SCHEMA_VERSION {
            return Err(ReportError::InvalidConfig(format!(
                "schema_version {} (supported: {})",
                self.schema_version, CONFIG_SCHEMA_VERSION
            )));
        }
        if self.limits.rows_per_page == 0 {
            return Err(ReportError::InvalidConfig(
                "limits.rows_per_page must be at least 1".to_string(),
            ));
        }
        if self.limits.max_columns == 0 {
            return Err(ReportError::InvalidConfig(
                "limits.max_columns must be at least 1".to_string(),
            ));
        }
        if self.date_format.trim().is_empty() {
            return Err(ReportError::InvalidConfig(
                "date_format must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
