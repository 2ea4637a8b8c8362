//! [`Converter`] implementation backed by the JSON envelope format.

use crate::config::JsonConverterConfig;
use crate::forward::{ensure_inferable, to_json_envelope};
use crate::reverse::from_json_envelope;
use connect_core::{
    Converter, ConverterConfigs, ConverterError, ConverterType, Schema, SchemaAndValue, Value,
};
use std::sync::Arc;
use tracing::{debug, info};

/// JSON converter.
///
/// Writes `{"schema": ..., "payload": ...}` documents (or bare payloads when
/// `schemas.enable=false`) and reads them back. Holds no mutable state after
/// [`configure`](Converter::configure), so one instance can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct JsonConverter {
    config: JsonConverterConfig,
    converter_type: ConverterType,
}

impl Default for JsonConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonConverter {
    /// Create a value converter with default settings.
    pub fn new() -> Self {
        Self {
            config: JsonConverterConfig::default(),
            converter_type: ConverterType::Value,
        }
    }

    pub fn with_config(config: JsonConverterConfig, converter_type: ConverterType) -> Self {
        Self {
            config,
            converter_type,
        }
    }

    pub fn config(&self) -> &JsonConverterConfig {
        &self.config
    }

    pub fn converter_type(&self) -> ConverterType {
        self.converter_type
    }
}

impl Converter for JsonConverter {
    fn configure(&mut self, configs: &ConverterConfigs, is_key: bool) -> Result<(), ConverterError> {
        self.config = JsonConverterConfig::from_configs(configs)?;
        self.converter_type = ConverterType::from_is_key(is_key);
        info!(
            "Configured JSON {} converter (schemas.enable={})",
            self.converter_type.as_str(),
            self.config.schemas_enable
        );
        Ok(())
    }

    fn from_connect_data(
        &self,
        topic: &str,
        schema: Option<&Schema>,
        value: &Value,
    ) -> Result<Vec<u8>, ConverterError> {
        let schema = match (schema, value) {
            (Some(schema), _) => Some(schema),
            // A struct always knows its own schema.
            (None, Value::Struct(record)) => Some(record.schema().as_ref()),
            (None, other) => {
                if self.config.schemas_enable {
                    ensure_inferable(other)
                        .map_err(|e| ConverterError::serialization(topic, e))?;
                }
                None
            }
        };
        if let Some(schema) = schema {
            schema
                .validate_value(value)
                .map_err(|e| ConverterError::serialization(topic, e))?;
        }

        let json = to_json_envelope(schema, value, self.config.schemas_enable)
            .map_err(|e| ConverterError::serialization(topic, e))?;
        let bytes = serde_json::to_vec(&json).map_err(|e| ConverterError::serialization(topic, e))?;

        debug!(
            "Serialized {} for topic '{topic}' ({} bytes)",
            self.converter_type.as_str(),
            bytes.len()
        );
        Ok(bytes)
    }

    fn to_connect_data(&self, topic: &str, bytes: &[u8]) -> Result<SchemaAndValue, ConverterError> {
        // Tombstones carry no payload.
        if bytes.is_empty() {
            return Ok(SchemaAndValue::null());
        }

        let json: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| ConverterError::deserialization(topic, e))?;
        let (schema, value) = from_json_envelope(json, self.config.schemas_enable)
            .map_err(|e| ConverterError::deserialization(topic, e))?;

        Ok(SchemaAndValue::new(schema.map(Arc::new), value))
    }
}
