//! Converter configuration parsed from flat string maps.

use connect_core::{ConverterConfigs, ConverterError};
use tracing::warn;

/// Key toggling the `{"schema", "payload"}` envelope.
pub const SCHEMAS_ENABLE: &str = "schemas.enable";

/// Settings recognised by [`JsonConverter`](crate::JsonConverter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonConverterConfig {
    /// Embed the schema next to each payload. When disabled, payloads are
    /// written bare and read back with inferred types.
    pub schemas_enable: bool,
}

impl Default for JsonConverterConfig {
    fn default() -> Self {
        Self {
            schemas_enable: true,
        }
    }
}

impl JsonConverterConfig {
    /// Parse settings, warning about (and ignoring) unknown keys.
    pub fn from_configs(configs: &ConverterConfigs) -> Result<Self, ConverterError> {
        let mut config = Self::default();

        for (key, value) in configs {
            match key.as_str() {
                SCHEMAS_ENABLE => config.schemas_enable = parse_bool(key, value)?,
                other => warn!("Ignoring unknown JSON converter option '{other}'"),
            }
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConverterError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConverterError::config(
            key,
            format!("expected 'true' or 'false', got '{value}'"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configs(pairs: &[(&str, &str)]) -> ConverterConfigs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = JsonConverterConfig::from_configs(&ConverterConfigs::new()).unwrap();
        assert!(config.schemas_enable);
    }

    #[test]
    fn test_schemas_enable_parsing() {
        let config = JsonConverterConfig::from_configs(&configs(&[("schemas.enable", "FALSE")])).unwrap();
        assert!(!config.schemas_enable);

        // Unknown keys are tolerated.
        let config = JsonConverterConfig::from_configs(&configs(&[("converter.type", "value")])).unwrap();
        assert!(config.schemas_enable);
    }

    #[test]
    fn test_invalid_bool() {
        let err = JsonConverterConfig::from_configs(&configs(&[("schemas.enable", "yes")])).unwrap_err();
        assert!(matches!(err, ConverterError::Config { ref key, .. } if key == "schemas.enable"));
    }
}
