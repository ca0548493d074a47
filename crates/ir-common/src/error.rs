//! Error types for model validation.

use thiserror::Error;

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while building or validating model values.
#[derive(Error, Debug)]
pub enum ModelError {
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record cell held a nested array or object.
    #[error("unsupported value for column '{key}': {kind}")]
    UnsupportedValue { key: String, kind: &'static str },

    /// A required form field was blank.
    #[error("required field '{0}' is blank")]
    BlankField(&'static str),

    /// The report date could not be parsed.
    #[error("invalid report date '{value}': expected YYYY-MM-DD or RFC 3339")]
    InvalidDate { value: String },
}
