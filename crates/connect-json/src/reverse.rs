//! Reverse conversion: JSON → Value.
//!
//! With a schema, every payload node is checked against it: integers are
//! range-checked for their width, logical-typed nodes are decoded back into
//! instants, and nulls are only accepted where the schema is optional.
//!
//! Without a schema, types are inferred from the JSON shape alone, so integers
//! widen to int64 and every number with a fraction becomes float64.

use crate::error::{JsonConverterError, Result};
use crate::schema::JsonSchema;
use base64::prelude::*;
use connect_core::{Date, LogicalCodec, LogicalType, Schema, SchemaType, Struct, Time, Timestamp, Value};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    schema: Option<JsonSchema>,
    payload: JsonValue,
}

/// Parse a decoded JSON document.
///
/// When `schemas_enabled`, the document must be a `{"schema", "payload"}`
/// envelope and the payload is read against the embedded schema. Otherwise the
/// whole document is the payload and its types are inferred.
pub fn from_json_envelope(
    json: JsonValue,
    schemas_enabled: bool,
) -> Result<(Option<Schema>, Value)> {
    if !schemas_enabled {
        return Ok((None, infer_value(&json)?));
    }

    let envelope: Envelope = serde_json::from_value(json).map_err(|e| {
        JsonConverterError::Envelope(format!(
            "expected an object with exactly 'schema' and 'payload' ({e})"
        ))
    })?;

    match envelope.schema {
        Some(schema_json) => {
            let schema = schema_json.to_schema()?;
            let value = json_to_value(&schema, &envelope.payload)?;
            Ok((Some(schema), value))
        }
        None => Ok((None, infer_value(&envelope.payload)?)),
    }
}

/// Read `json` as a value of `schema`.
pub fn json_to_value(schema: &Schema, json: &JsonValue) -> Result<Value> {
    if json.is_null() {
        return if schema.is_optional() {
            Ok(Value::Null)
        } else {
            Err(mismatch(schema, "non-null value", json))
        };
    }

    if let Some(logical) = schema.logical_type() {
        let instant = match logical {
            LogicalType::Date => Date::decode(schema, read_int::<i32>(schema, json)?)?,
            LogicalType::Time => Time::decode(schema, read_int::<i32>(schema, json)?)?,
            LogicalType::Timestamp => Timestamp::decode(schema, read_int::<i64>(schema, json)?)?,
        };
        return Ok(Value::Instant(instant));
    }

    let value = match schema.schema_type() {
        SchemaType::Int8 => Value::Int8(read_int(schema, json)?),
        SchemaType::Int16 => Value::Int16(read_int(schema, json)?),
        SchemaType::Int32 => Value::Int32(read_int(schema, json)?),
        SchemaType::Int64 => Value::Int64(read_int(schema, json)?),
        // Narrowing to f32 is the declared precision of the field.
        SchemaType::Float32 => Value::Float32(read_float(schema, json)? as f32),
        SchemaType::Float64 => Value::Float64(read_float(schema, json)?),
        SchemaType::Boolean => Value::Boolean(
            json.as_bool()
                .ok_or_else(|| mismatch(schema, "boolean", json))?,
        ),
        SchemaType::String => Value::String(
            json.as_str()
                .ok_or_else(|| mismatch(schema, "string", json))?
                .to_string(),
        ),
        SchemaType::Bytes => {
            let encoded = json
                .as_str()
                .ok_or_else(|| mismatch(schema, "base64 string", json))?;
            Value::Bytes(BASE64_STANDARD.decode(encoded)?)
        }
        SchemaType::Array => {
            let items = json
                .as_array()
                .ok_or_else(|| mismatch(schema, "array", json))?;
            let element = element_schema(schema)?;
            Value::Array(
                items
                    .iter()
                    .map(|item| json_to_value(element, item))
                    .collect::<Result<Vec<_>>>()?,
            )
        }
        SchemaType::Map => {
            let entries = json
                .as_object()
                .ok_or_else(|| mismatch(schema, "object", json))?;
            let element = element_schema(schema)?;
            let mut map = BTreeMap::new();
            for (key, item) in entries {
                map.insert(key.clone(), json_to_value(element, item)?);
            }
            Value::Map(map)
        }
        SchemaType::Struct => {
            let object = json
                .as_object()
                .ok_or_else(|| mismatch(schema, "object", json))?;
            let mut record = Struct::new(Arc::new(schema.clone()))?;
            for field in schema.fields() {
                let member = object.get(field.name()).unwrap_or(&JsonValue::Null);
                record.put_field(field, json_to_value(field.schema(), member)?)?;
            }
            record.validate()?;
            Value::Struct(record)
        }
    };
    Ok(value)
}

/// Infer a value from the JSON shape alone.
pub fn infer_value(json: &JsonValue) -> Result<Value> {
    let value = match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Boolean(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Int64(i),
            None => Value::Float64(n.as_f64().ok_or_else(|| {
                JsonConverterError::TypeMismatch {
                    schema: "<inferred>".to_string(),
                    expected: "number",
                    found: n.to_string(),
                }
            })?),
        },
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Array(items) => Value::Array(
            items
                .iter()
                .map(infer_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        JsonValue::Object(entries) => {
            let mut map = BTreeMap::new();
            for (key, item) in entries {
                map.insert(key.clone(), infer_value(item)?);
            }
            Value::Map(map)
        }
    };
    Ok(value)
}

fn read_int<T: TryFrom<i64>>(schema: &Schema, json: &JsonValue) -> Result<T> {
    let wide = json
        .as_i64()
        .ok_or_else(|| mismatch(schema, "integer", json))?;
    T::try_from(wide).map_err(|_| JsonConverterError::IntegerOutOfRange {
        value: wide,
        schema_type: schema.describe(),
    })
}

fn read_float(schema: &Schema, json: &JsonValue) -> Result<f64> {
    json.as_f64()
        .ok_or_else(|| mismatch(schema, "number", json))
}

fn element_schema(schema: &Schema) -> Result<&Schema> {
    schema.value_schema().ok_or_else(|| {
        JsonConverterError::InvalidSchema(format!("{} has no element schema", schema.describe()))
    })
}

fn mismatch(schema: &Schema, expected: &'static str, json: &JsonValue) -> JsonConverterError {
    JsonConverterError::TypeMismatch {
        schema: schema.describe(),
        expected,
        found: json_kind(json).to_string(),
    }
}

fn json_kind(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use connect_core::SchemaBuilder;
    use serde_json::json;

    fn int32() -> Schema {
        SchemaBuilder::int32().build().unwrap()
    }

    #[test]
    fn test_integer_range_checks() {
        let int8 = SchemaBuilder::int8().build().unwrap();
        assert_eq!(json_to_value(&int8, &json!(127)).unwrap(), Value::Int8(127));
        assert!(matches!(
            json_to_value(&int8, &json!(128)),
            Err(JsonConverterError::IntegerOutOfRange { value: 128, .. })
        ));
        assert!(matches!(
            json_to_value(&int32(), &json!(1.5)),
            Err(JsonConverterError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_null_requires_optional() {
        assert!(json_to_value(&int32(), &JsonValue::Null).is_err());

        let optional = SchemaBuilder::int32().optional().build().unwrap();
        assert_eq!(json_to_value(&optional, &JsonValue::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_logical_decode() {
        let day = json_to_value(&Date::schema(), &json!(11574)).unwrap();
        assert_eq!(
            day,
            Value::from(Utc.with_ymd_and_hms(2001, 9, 9, 0, 0, 0).unwrap())
        );

        // Decode accepts the closing midnight, the encoder never produces it.
        assert!(json_to_value(&Time::schema(), &json!(86_400_000)).is_ok());
        assert!(matches!(
            json_to_value(&Time::schema(), &json!(86_400_001)),
            Err(JsonConverterError::Data(_))
        ));
    }

    #[test]
    fn test_struct_missing_member_reads_as_null() {
        let schema = SchemaBuilder::structure()
            .field("ID", int32())
            .field("NOTE", SchemaBuilder::string().optional().build().unwrap())
            .build()
            .unwrap();

        let value = json_to_value(&schema, &json!({"ID": 7})).unwrap();
        let record = value.as_struct().unwrap();
        assert_eq!(record.get("ID").unwrap(), &Value::Int32(7));
        assert!(record.get("NOTE").unwrap().is_null());

        assert!(json_to_value(&schema, &json!({"NOTE": "x"})).is_err());
    }

    #[test]
    fn test_bytes_base64() {
        let bytes = SchemaBuilder::bytes().build().unwrap();
        assert_eq!(
            json_to_value(&bytes, &json!("aGk=")).unwrap(),
            Value::Bytes(b"hi".to_vec())
        );
        assert!(matches!(
            json_to_value(&bytes, &json!("not base64!")),
            Err(JsonConverterError::Base64(_))
        ));
    }

    #[test]
    fn test_infer_value() {
        let value = infer_value(&json!({"a": 1, "b": [1.5, "x"], "c": null})).unwrap();
        let Value::Map(map) = value else {
            panic!("expected map");
        };
        assert_eq!(map["a"], Value::Int64(1));
        assert_eq!(
            map["b"],
            Value::Array(vec![Value::Float64(1.5), Value::String("x".into())])
        );
        assert!(map["c"].is_null());
    }

    #[test]
    fn test_envelope_errors() {
        assert!(matches!(
            from_json_envelope(json!([1, 2]), true),
            Err(JsonConverterError::Envelope(_))
        ));
        assert!(matches!(
            from_json_envelope(json!({"payload": 1, "extra": 2}), true),
            Err(JsonConverterError::Envelope(_))
        ));

        let (schema, value) = from_json_envelope(json!({"schema": null, "payload": 3}), true).unwrap();
        assert!(schema.is_none());
        assert_eq!(value, Value::Int64(3));

        let (schema, value) = from_json_envelope(json!([1, 2]), false).unwrap();
        assert!(schema.is_none());
        assert_eq!(value, Value::Array(vec![Value::Int64(1), Value::Int64(2)]));
    }
}
