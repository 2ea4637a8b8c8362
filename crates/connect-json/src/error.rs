//! Error types for connect-json crate.

use connect_core::DataError;
use thiserror::Error;

/// Errors that can occur while converting between values and JSON.
///
/// These are folded into [`connect_core::ConverterError`] at the converter
/// boundary, tagged with the topic being converted.
#[derive(Error, Debug)]
pub enum JsonConverterError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("Invalid base64 in bytes field: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Expected {expected} for {schema}, found {found}")]
    TypeMismatch {
        schema: String,
        expected: &'static str,
        found: String,
    },

    #[error("Integer {value} out of range for {schema_type}")]
    IntegerOutOfRange { value: i64, schema_type: String },

    #[error("Non-finite float {0} cannot be represented in JSON")]
    NonFiniteFloat(f64),

    #[error("A schema is required to convert a {0} value")]
    MissingSchema(&'static str),

    #[error("A {0} value cannot be read back without a schema")]
    NotInferable(&'static str),

    #[error("Invalid JSON envelope: {0}")]
    Envelope(String),

    #[error("Invalid JSON schema: {0}")]
    InvalidSchema(String),
}

/// Result type alias for connect-json operations.
pub type Result<T> = std::result::Result<T, JsonConverterError>;
