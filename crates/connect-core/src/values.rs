//! Value representations for structured records.
//!
//! [`Value`] is the dynamically typed carrier for anything a [`Schema`] can
//! describe. Temporal fields hold the logical value ([`Value::Instant`]); the
//! integral encoding only appears at the converter boundary.

use crate::error::{DataError, Result};
use crate::field::Field;
use crate::instant::UtcInstant;
use crate::schema::{Schema, SchemaType};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Dynamically typed value.
///
/// Floats compare and hash by bit pattern so that `Value` can be `Eq` and
/// used inside hashed records.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
    /// Logical temporal value (Date, Time or Timestamp, decided by the schema).
    Instant(UtcInstant),
    Array(Vec<Value>),
    /// String-keyed map, ordered by key.
    Map(BTreeMap<String, Value>),
    Struct(Struct),
}

impl Value {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Int8(_) => "int8",
            Value::Int16(_) => "int16",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Instant(_) => "instant",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Struct(_) => "struct",
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an i64, widening smaller integers.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(i) => Some(i64::from(*i)),
            Value::Int16(i) => Some(i64::from(*i)),
            Value::Int32(i) => Some(i64::from(*i)),
            Value::Int64(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_instant(&self) -> Option<&UtcInstant> {
        match self {
            Value::Instant(instant) => Some(instant),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&Struct> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Int8(a), Value::Int8(b)) => a == b,
            (Value::Int16(a), Value::Int16(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Float32(a), Value::Float32(b)) => a.to_bits() == b.to_bits(),
            (Value::Float64(a), Value::Float64(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Instant(a), Value::Instant(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Struct(a), Value::Struct(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(b) => b.hash(state),
            Value::Int8(i) => i.hash(state),
            Value::Int16(i) => i.hash(state),
            Value::Int32(i) => i.hash(state),
            Value::Int64(i) => i.hash(state),
            Value::Float32(f) => f.to_bits().hash(state),
            Value::Float64(f) => f.to_bits().hash(state),
            Value::String(s) => s.hash(state),
            Value::Bytes(b) => b.hash(state),
            Value::Instant(instant) => instant.hash(state),
            Value::Array(items) => items.hash(state),
            Value::Map(entries) => entries.hash(state),
            Value::Struct(s) => s.hash(state),
        }
    }
}

macro_rules! impl_from_for_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_for_value!(
    bool => Boolean,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    Vec<u8> => Bytes,
    UtcInstant => Instant,
    Struct => Struct,
);

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Instant(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

// ============================================================================
// Struct
// ============================================================================

/// Structured value addressed by named, indexed fields.
///
/// Values are stored positionally; field `i` of the schema lives at slot `i`.
/// Every `put` validates the value against the field's schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Struct {
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl Struct {
    /// Create an empty struct (all fields null) for a struct schema.
    pub fn new(schema: impl Into<Arc<Schema>>) -> Result<Self> {
        let schema = schema.into();
        if schema.schema_type() != SchemaType::Struct {
            return Err(DataError::NotAStruct(schema.schema_type().to_string()));
        }
        let values = vec![Value::Null; schema.fields().len()];
        Ok(Self { schema, values })
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Set a field by name.
    pub fn put(&mut self, field_name: &str, value: impl Into<Value>) -> Result<()> {
        let field = self
            .schema
            .field(field_name)
            .ok_or_else(|| DataError::FieldNotFound(field_name.to_string()))?
            .clone();
        self.put_field(&field, value)
    }

    /// Set a field by descriptor. The descriptor must belong to this struct's schema.
    pub fn put_field(&mut self, field: &Field, value: impl Into<Value>) -> Result<()> {
        if self.schema.fields().get(field.index()) != Some(field) {
            return Err(DataError::FieldNotFound(field.name().to_string()));
        }
        let value = value.into();
        field.schema().validate_value(&value)?;
        self.values[field.index()] = value;
        Ok(())
    }

    /// Consuming variant of [`put`](Self::put) for chained construction.
    pub fn with(mut self, field_name: &str, value: impl Into<Value>) -> Result<Self> {
        self.put(field_name, value)?;
        Ok(self)
    }

    /// Get a field value by name. Unset fields read as [`Value::Null`].
    pub fn get(&self, field_name: &str) -> Result<&Value> {
        let field = self
            .schema
            .field(field_name)
            .ok_or_else(|| DataError::FieldNotFound(field_name.to_string()))?;
        Ok(&self.values[field.index()])
    }

    pub fn get_field(&self, field: &Field) -> Result<&Value> {
        if self.schema.fields().get(field.index()) != Some(field) {
            return Err(DataError::FieldNotFound(field.name().to_string()));
        }
        Ok(&self.values[field.index()])
    }

    /// Iterate `(field, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Field, &Value)> {
        self.schema.fields().iter().zip(self.values.iter())
    }

    /// Check that every required field has been set.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.iter() {
            if value.is_null() && !field.schema().is_optional() {
                return Err(DataError::MissingRequiredField(field.name().to_string()));
            }
            if let Value::Struct(nested) = value {
                nested.validate()?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// SchemaAndValue
// ============================================================================

/// A value paired with the schema that describes it.
///
/// The schema is absent for schemaless data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaAndValue {
    schema: Option<Arc<Schema>>,
    value: Value,
}

impl SchemaAndValue {
    pub fn new(schema: Option<Arc<Schema>>, value: Value) -> Self {
        Self { schema, value }
    }

    /// Schemaless null.
    pub fn null() -> Self {
        Self::new(None, Value::Null)
    }

    /// Wrap a struct together with its own schema.
    pub fn from_struct(record: Struct) -> Self {
        Self {
            schema: Some(Arc::clone(record.schema())),
            value: Value::Struct(record),
        }
    }

    pub fn schema(&self) -> Option<&Arc<Schema>> {
        self.schema.as_ref()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_parts(self) -> (Option<Arc<Schema>>, Value) {
        (self.schema, self.value)
    }
}
