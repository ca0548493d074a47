//! Configuration loading for ir-core.
//!
//! Resolution order (highest to lowest priority):
//! 1. Explicit `--config` file
//! 2. `IR_CONFIG` environment variable
//! 3. `$XDG_CONFIG_HOME/installation-report/report.json` (or `~/.config/...`)
//! 4. Built-in defaults

use ir_consolidate::{UnitConsolidator, DEFAULT_UNIT_COLUMNS};
use ir_report::config::CONFIG_SCHEMA_VERSION;
use ir_report::{ReportConfig, ReportError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Default XDG config directory name.
const CONFIG_DIR_NAME: &str = "installation-report";

/// Config file name inside the config directory.
const CONFIG_FILE_NAME: &str = "report.json";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "IR_CONFIG";

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid JSON in config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },

    #[error("Semantic validation failed: {0}")]
    Invalid(#[from] ReportError),
}

/// Full application configuration: report settings plus consolidation keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Report rendering settings.
    #[serde(flatten)]
    pub report: ReportConfig,
    /// Column names recognised as the unit identifier.
    #[serde(default = "default_unit_columns")]
    pub unit_columns: Vec<String>,
}

fn default_unit_columns() -> Vec<String> {
    DEFAULT_UNIT_COLUMNS.iter().map(|s| s.to_string()).collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            report: ReportConfig::default(),
            unit_columns: default_unit_columns(),
        }
    }
}

impl AppConfig {
    /// Consolidator keyed on the configured unit columns.
    pub fn consolidator(&self) -> UnitConsolidator {
        UnitConsolidator::new(self.unit_columns.clone())
    }
}

/// Resolved configuration with provenance information.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The loaded configuration.
    pub config: AppConfig,
    /// Path of the file it came from (None if using defaults).
    pub path: Option<PathBuf>,
}

/// Configuration resolution options.
#[derive(Debug, Default)]
pub struct ConfigOptions {
    /// Explicit config file (highest priority).
    pub config_path: Option<PathBuf>,
}

/// Load configuration with the standard resolution order.
///
/// An explicit path, from the option or `IR_CONFIG`, must exist. The XDG
/// location is optional.
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    let explicit = options
        .config_path
        .clone()
        .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound { path });
            }
            Some(path)
        }
        None => {
            let default_path = xdg_config_dir().join(CONFIG_FILE_NAME);
            default_path.exists().then_some(default_path)
        }
    };

    let config = match &path {
        Some(path) => load_config_from_file(path)?,
        None => {
            debug!("No config file found; using defaults");
            AppConfig::default()
        }
    };

    config.report.validate()?;
    Ok(ResolvedConfig { config, path })
}

fn xdg_config_dir() -> PathBuf {
    let xdg_config = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        });
    xdg_config.join(CONFIG_DIR_NAME)
}

/// Load configuration from a specific file.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: AppConfig = serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if config.report.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(ConfigError::VersionMismatch {
            expected: CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.report.schema_version.clone(),
        });
    }

    debug!(path = %path.display(), "Config loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ir_report::EmptyDatasetPolicy;
    use tempfile::tempdir;

    fn write(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("report.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_explicit_file_loads() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            r#"{"empty_dataset": "redirect", "limits": {"rows_per_page": 10},
                "unit_columns": ["Suite"]}"#,
        );
        let resolved = load_config(&ConfigOptions {
            config_path: Some(path.clone()),
        })
        .unwrap();

        assert_eq!(resolved.path, Some(path));
        assert_eq!(
            resolved.config.report.empty_dataset,
            EmptyDatasetPolicy::Redirect
        );
        assert_eq!(resolved.config.report.limits.rows_per_page, 10);
        assert_eq!(resolved.config.unit_columns, vec!["Suite".to_string()]);
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config(&ConfigOptions {
            config_path: Some(PathBuf::from("/nonexistent/report.json")),
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_version_mismatch() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), r#"{"schema_version": "9.9.9"}"#);
        let err = load_config_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::VersionMismatch { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "{not json");
        let err = load_config_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), r#"{"limits": {"rows_per_page": 0}}"#);
        let err = load_config(&ConfigOptions {
            config_path: Some(path),
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_defaults_include_unit_columns() {
        let config = AppConfig::default();
        assert_eq!(config.unit_columns.len(), DEFAULT_UNIT_COLUMNS.len());
        assert_eq!(config.consolidator().unit_columns()[0], "Unit");
    }
}
