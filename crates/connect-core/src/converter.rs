//! Converter boundary between structured data and bytes.
//!
//! A [`Converter`] is configured once, then shared (typically behind an
//! `Arc`) by every producer task. Configuration takes `&mut self`; the two
//! conversions take `&self`, so implementations must not rely on exclusive
//! state while converting.

use crate::error::ConverterError;
use crate::schema::Schema;
use crate::values::{SchemaAndValue, Value};
use std::collections::HashMap;

/// Flat converter configuration. Recognised keys are converter-specific.
pub type ConverterConfigs = HashMap<String, String>;

/// Which side of a record a converter instance handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConverterType {
    Key,
    Value,
}

impl ConverterType {
    pub fn from_is_key(is_key: bool) -> Self {
        if is_key {
            ConverterType::Key
        } else {
            ConverterType::Value
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConverterType::Key => "key",
            ConverterType::Value => "value",
        }
    }
}

/// Translates between structured values and transmittable bytes.
pub trait Converter: Send + Sync {
    /// One-time setup before any conversion. `is_key` selects key-specific
    /// rather than value-specific behaviour.
    fn configure(&mut self, configs: &ConverterConfigs, is_key: bool) -> Result<(), ConverterError>;

    /// Serialize a value. Must be deterministic for a given
    /// `(topic, schema, value)`.
    fn from_connect_data(
        &self,
        topic: &str,
        schema: Option<&Schema>,
        value: &Value,
    ) -> Result<Vec<u8>, ConverterError>;

    /// Deserialize bytes produced by [`from_connect_data`](Self::from_connect_data).
    ///
    /// Malformed or truncated input fails with
    /// [`ConverterError::Deserialization`].
    fn to_connect_data(&self, topic: &str, bytes: &[u8]) -> Result<SchemaAndValue, ConverterError>;
}
