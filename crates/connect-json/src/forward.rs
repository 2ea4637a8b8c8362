//! Forward conversion: Value → JSON.
//!
//! Logical-typed values go through the logical codecs, so a Date field is
//! written as its day count and a Timestamp as epoch millis. Bytes are
//! written as standard base64.

use crate::error::{JsonConverterError, Result};
use crate::schema::JsonSchema;
use base64::prelude::*;
use connect_core::{Date, LogicalCodec, LogicalType, Schema, Time, Timestamp, Value};
use serde_json::{Map, Value as JsonValue};

/// Build the payload JSON, wrapped in a `{"schema", "payload"}` envelope when
/// `schemas_enabled`.
pub fn to_json_envelope(
    schema: Option<&Schema>,
    value: &Value,
    schemas_enabled: bool,
) -> Result<JsonValue> {
    let payload = value_to_json(schema, value)?;
    if !schemas_enabled {
        return Ok(payload);
    }

    let schema_json = match schema {
        Some(s) => serde_json::to_value(JsonSchema::from_schema(s, None))?,
        None => JsonValue::Null,
    };
    let mut envelope = Map::new();
    envelope.insert("schema".to_string(), schema_json);
    envelope.insert("payload".to_string(), payload);
    Ok(JsonValue::Object(envelope))
}

/// Convert a single value. `schema` is only consulted for logical types and
/// to find element schemas; validate the value against it beforehand.
pub fn value_to_json(schema: Option<&Schema>, value: &Value) -> Result<JsonValue> {
    let json = match value {
        Value::Null => JsonValue::Null,
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::Int8(i) => JsonValue::from(*i),
        Value::Int16(i) => JsonValue::from(*i),
        Value::Int32(i) => JsonValue::from(*i),
        Value::Int64(i) => JsonValue::from(*i),
        Value::Float32(f) => float_to_json(f64::from(*f))?,
        Value::Float64(f) => float_to_json(*f)?,
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Bytes(b) => JsonValue::String(BASE64_STANDARD.encode(b)),
        Value::Instant(instant) => {
            let schema = schema.ok_or(JsonConverterError::MissingSchema("logical"))?;
            match LogicalType::from_schema(schema)? {
                LogicalType::Date => JsonValue::from(Date::encode(schema, instant)?),
                LogicalType::Time => JsonValue::from(Time::encode(schema, instant)?),
                LogicalType::Timestamp => JsonValue::from(Timestamp::encode(schema, instant)?),
            }
        }
        Value::Array(items) => {
            let element = schema.and_then(Schema::value_schema);
            JsonValue::Array(
                items
                    .iter()
                    .map(|item| value_to_json(element, item))
                    .collect::<Result<Vec<_>>>()?,
            )
        }
        Value::Map(entries) => {
            let element = schema.and_then(Schema::value_schema);
            let mut object = Map::new();
            for (key, item) in entries {
                object.insert(key.clone(), value_to_json(element, item)?);
            }
            JsonValue::Object(object)
        }
        Value::Struct(record) => {
            record.validate()?;
            let mut object = Map::new();
            for (field, item) in record.iter() {
                object.insert(
                    field.name().to_string(),
                    value_to_json(Some(field.schema()), item)?,
                );
            }
            JsonValue::Object(object)
        }
    };
    Ok(json)
}

/// Check that a value written without a schema reads back unchanged.
///
/// Schemaless payloads decode as null, boolean, int64, float64, string, array
/// or map, so any other variant anywhere in `value` would come back altered.
pub fn ensure_inferable(value: &Value) -> Result<()> {
    match value {
        Value::Null
        | Value::Boolean(_)
        | Value::Int64(_)
        | Value::Float64(_)
        | Value::String(_) => Ok(()),
        Value::Array(items) => items.iter().try_for_each(ensure_inferable),
        Value::Map(entries) => entries.values().try_for_each(ensure_inferable),
        other => Err(JsonConverterError::NotInferable(other.type_name())),
    }
}

fn float_to_json(f: f64) -> Result<JsonValue> {
    serde_json::Number::from_f64(f)
        .map(JsonValue::Number)
        .ok_or(JsonConverterError::NonFiniteFloat(f))
}
