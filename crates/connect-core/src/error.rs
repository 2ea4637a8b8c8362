//! Error types for connect-core.

use thiserror::Error;

/// Errors raised while building schemas, populating structs or converting
/// logical values.
///
/// None of these are transient: the value or schema that triggered them is
/// malformed input and the conversion must be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error(
        "Requested conversion of {expected} but the schema does not match (schema name: {})",
        .found.as_deref().unwrap_or("<none>")
    )]
    InvalidSchema {
        expected: &'static str,
        found: Option<String>,
    },

    #[error("{logical_type} value out of range: {message}")]
    OutOfRange {
        logical_type: &'static str,
        message: String,
    },

    #[error("Value of type {found} does not match schema type {expected}")]
    SchemaTypeMismatch { expected: String, found: String },

    #[error("Missing value for required field '{0}'")]
    MissingRequiredField(String),

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Schema of type {0} is not a struct schema")]
    NotAStruct(String),

    #[error("Duplicate field name in struct schema: {0}")]
    DuplicateField(String),

    #[error("Invalid schema definition: {0}")]
    InvalidSchemaDefinition(String),
}

/// Result type alias for connect-core operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors raised at the converter boundary.
///
/// A failed conversion aborts the enclosing delivery attempt; converters never
/// drop data to recover.
#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("Failed to serialize data for topic '{topic}': {message}")]
    Serialization { topic: String, message: String },

    #[error("Failed to deserialize data from topic '{topic}': {message}")]
    Deserialization { topic: String, message: String },

    #[error("Invalid value for converter option '{key}': {message}")]
    Config { key: String, message: String },
}

impl ConverterError {
    pub fn serialization(topic: &str, cause: impl std::fmt::Display) -> Self {
        Self::Serialization {
            topic: topic.to_string(),
            message: cause.to_string(),
        }
    }

    pub fn deserialization(topic: &str, cause: impl std::fmt::Display) -> Self {
        Self::Deserialization {
            topic: topic.to_string(),
            message: cause.to_string(),
        }
    }

    pub fn config(key: &str, message: impl Into<String>) -> Self {
        Self::Config {
            key: key.to_string(),
            message: message.into(),
        }
    }
}
