//! Error types for store operations.

use thiserror::Error;

/// Errors raised by store backends.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Store file is valid JSON but not a `{key: string}` object
    #[error("corrupted store file: {0}")]
    Corrupted(String),

    /// Atomic replace of the store file failed
    #[error("failed to persist store file: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// Value rejected before writing
    #[error("invalid value for '{key}': {source}")]
    InvalidValue {
        key: &'static str,
        #[source]
        source: ir_common::ModelError,
    },
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Why report input could not be loaded.
///
/// Every variant leads to the same outcome for the view: log and redirect home.
#[derive(Error, Debug)]
pub enum LoadError {
    /// A required key is absent from the store
    #[error("missing stored value '{key}'")]
    MissingData { key: &'static str },

    /// A stored value is present but is not valid JSON of the expected shape
    #[error("stored value '{key}' could not be parsed: {reason}")]
    ParseFailure { key: &'static str, reason: String },

    /// The store itself could not be read
    #[error("store unavailable: {0}")]
    Store(#[from] StoreError),
}

impl LoadError {
    /// Stable short name for logs and CLI payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::MissingData { .. } => "missing_data",
            LoadError::ParseFailure { .. } => "parse_failure",
            LoadError::Store(_) => "store_unavailable",
        }
    }
}
