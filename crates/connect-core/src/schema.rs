//! Schema definitions for structured records.
//!
//! A [`Schema`] describes one value: its primitive base encoding, whether it
//! may be null, and an optional `name`/`version` pair. The name doubles as
//! the logical-type tag: a schema named
//! `org.apache.kafka.connect.data.Date` is an `int32` that carries a calendar
//! day (see [`crate::logical`]).
//!
//! Schemas are immutable once built. Use [`SchemaBuilder`] to create them;
//! the builder assigns struct field indexes in declaration order.

use crate::error::{DataError, Result};
use crate::field::Field;
use crate::logical::LogicalType;
use crate::values::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Schema Types
// ============================================================================

/// Primitive base encoding of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Boolean,
    String,
    Bytes,
    /// Homogeneous list; element schema is required.
    Array,
    /// String-keyed map; value schema is required.
    Map,
    /// Ordered, named fields.
    Struct,
}

impl SchemaType {
    /// Wire name of this type (`"int32"`, `"struct"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Int8 => "int8",
            SchemaType::Int16 => "int16",
            SchemaType::Int32 => "int32",
            SchemaType::Int64 => "int64",
            SchemaType::Float32 => "float32",
            SchemaType::Float64 => "float64",
            SchemaType::Boolean => "boolean",
            SchemaType::String => "string",
            SchemaType::Bytes => "bytes",
            SchemaType::Array => "array",
            SchemaType::Map => "map",
            SchemaType::Struct => "struct",
        }
    }

    /// Check if this is a primitive (non-container) type.
    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            SchemaType::Array | SchemaType::Map | SchemaType::Struct
        )
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Immutable description of a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Schema {
    schema_type: SchemaType,
    optional: bool,
    name: Option<String>,
    version: Option<i32>,
    doc: Option<String>,
    fields: Vec<Field>,
    value_schema: Option<Box<Schema>>,
}

impl Schema {
    /// Bare primitive schema: required, unnamed, unversioned.
    pub(crate) fn primitive(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            optional: false,
            name: None,
            version: None,
            doc: None,
            fields: Vec::new(),
            value_schema: None,
        }
    }

    pub(crate) fn named(mut self, name: &str, version: i32) -> Self {
        self.name = Some(name.to_string());
        self.version = Some(version);
        self
    }

    pub fn schema_type(&self) -> SchemaType {
        self.schema_type
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Schema name. For logical types this is the logical-type identifier.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn version(&self) -> Option<i32> {
        self.version
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Struct fields in declaration order. Empty for non-struct schemas.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a struct field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Element schema of an array, or value schema of a map.
    pub fn value_schema(&self) -> Option<&Schema> {
        self.value_schema.as_deref()
    }

    /// Logical type tagged by this schema's name, if any.
    pub fn logical_type(&self) -> Option<LogicalType> {
        self.name().and_then(LogicalType::from_name)
    }

    /// Check that `value` may be stored under this schema.
    ///
    /// Null is only accepted for optional schemas. Logical-typed schemas only
    /// accept instants, and only ones the logical codec can encode. Struct
    /// values must carry a schema equal to this one.
    pub fn validate_value(&self, value: &Value) -> Result<()> {
        if value.is_null() {
            return if self.optional {
                Ok(())
            } else {
                Err(self.mismatch(value))
            };
        }

        if let Some(logical) = self.logical_type() {
            return match value {
                Value::Instant(instant) => logical.encode_value(self, instant).map(|_| ()),
                other => Err(self.mismatch(other)),
            };
        }

        match (self.schema_type, value) {
            (SchemaType::Int8, Value::Int8(_))
            | (SchemaType::Int16, Value::Int16(_))
            | (SchemaType::Int32, Value::Int32(_))
            | (SchemaType::Int64, Value::Int64(_))
            | (SchemaType::Float32, Value::Float32(_))
            | (SchemaType::Float64, Value::Float64(_))
            | (SchemaType::Boolean, Value::Boolean(_))
            | (SchemaType::String, Value::String(_))
            | (SchemaType::Bytes, Value::Bytes(_)) => Ok(()),
            (SchemaType::Array, Value::Array(items)) => {
                let element = self.require_value_schema()?;
                items.iter().try_for_each(|item| element.validate_value(item))
            }
            (SchemaType::Map, Value::Map(entries)) => {
                let element = self.require_value_schema()?;
                entries
                    .values()
                    .try_for_each(|item| element.validate_value(item))
            }
            (SchemaType::Struct, Value::Struct(record)) => {
                if record.schema().as_ref() == self {
                    Ok(())
                } else {
                    Err(DataError::SchemaTypeMismatch {
                        expected: self.describe(),
                        found: format!("struct {}", record.schema().describe()),
                    })
                }
            }
            (_, other) => Err(self.mismatch(other)),
        }
    }

    /// Short human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({name})", self.schema_type),
            None => self.schema_type.to_string(),
        }
    }

    fn require_value_schema(&self) -> Result<&Schema> {
        self.value_schema().ok_or_else(|| {
            DataError::InvalidSchemaDefinition(format!(
                "{} schema has no element schema",
                self.schema_type
            ))
        })
    }

    fn mismatch(&self, value: &Value) -> DataError {
        DataError::SchemaTypeMismatch {
            expected: self.describe(),
            found: value.type_name().to_string(),
        }
    }
}

// ============================================================================
// Schema Builder
// ============================================================================

/// Builder for [`Schema`].
///
/// ```rust
/// use connect_core::{Date, LogicalCodec, SchemaBuilder};
///
/// let schema = SchemaBuilder::structure()
///     .name("inventory.orders")
///     .field("id", SchemaBuilder::int64().build().unwrap())
///     .field("order_date", Date::schema())
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.field("order_date").unwrap().index(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    schema_type: SchemaType,
    optional: bool,
    name: Option<String>,
    version: Option<i32>,
    doc: Option<String>,
    fields: Vec<(String, Schema)>,
    value_schema: Option<Box<Schema>>,
}

impl SchemaBuilder {
    /// Start a builder for the given type.
    ///
    /// Array and map schemas built this way fail in [`build`](Self::build)
    /// because they lack an element schema; prefer [`array`](Self::array)
    /// and [`map`](Self::map).
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            optional: false,
            name: None,
            version: None,
            doc: None,
            fields: Vec::new(),
            value_schema: None,
        }
    }

    pub fn int8() -> Self {
        Self::new(SchemaType::Int8)
    }

    pub fn int16() -> Self {
        Self::new(SchemaType::Int16)
    }

    pub fn int32() -> Self {
        Self::new(SchemaType::Int32)
    }

    pub fn int64() -> Self {
        Self::new(SchemaType::Int64)
    }

    pub fn float32() -> Self {
        Self::new(SchemaType::Float32)
    }

    pub fn float64() -> Self {
        Self::new(SchemaType::Float64)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaType::Boolean)
    }

    pub fn string() -> Self {
        Self::new(SchemaType::String)
    }

    pub fn bytes() -> Self {
        Self::new(SchemaType::Bytes)
    }

    /// Array whose elements are described by `items`.
    pub fn array(items: Schema) -> Self {
        let mut builder = Self::new(SchemaType::Array);
        builder.value_schema = Some(Box::new(items));
        builder
    }

    /// String-keyed map whose values are described by `values`.
    pub fn map(values: Schema) -> Self {
        let mut builder = Self::new(SchemaType::Map);
        builder.value_schema = Some(Box::new(values));
        builder
    }

    /// Struct schema; add members with [`field`](Self::field).
    pub fn structure() -> Self {
        Self::new(SchemaType::Struct)
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn version(mut self, version: i32) -> Self {
        self.version = Some(version);
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Append a struct member. Its index is its position in declaration order.
    pub fn field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.push((name.into(), schema));
        self
    }

    /// Finish the schema.
    ///
    /// # Errors
    ///
    /// - fields declared on a non-struct schema
    /// - duplicate field names
    /// - array/map without an element schema
    pub fn build(self) -> Result<Schema> {
        if self.schema_type != SchemaType::Struct && !self.fields.is_empty() {
            return Err(DataError::NotAStruct(self.schema_type.to_string()));
        }
        if matches!(self.schema_type, SchemaType::Array | SchemaType::Map)
            && self.value_schema.is_none()
        {
            return Err(DataError::InvalidSchemaDefinition(format!(
                "{} schema requires an element schema",
                self.schema_type
            )));
        }

        let mut fields: Vec<Field> = Vec::with_capacity(self.fields.len());
        for (index, (name, schema)) in self.fields.into_iter().enumerate() {
            if fields.iter().any(|f| f.name() == name) {
                return Err(DataError::DuplicateField(name));
            }
            fields.push(Field::new(name, index, schema));
        }

        Ok(Schema {
            schema_type: self.schema_type,
            optional: self.optional,
            name: self.name,
            version: self.version,
            doc: self.doc,
            fields,
            value_schema: self.value_schema,
        })
    }
}
