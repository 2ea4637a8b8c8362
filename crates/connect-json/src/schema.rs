//! JSON representation of schemas.
//!
//! ```json
//! {
//!     "type": "struct",
//!     "optional": false,
//!     "name": "HR.EMPLOYEES",
//!     "fields": [
//!         { "type": "int64", "optional": false, "field": "ID" },
//!         {
//!             "type": "int32",
//!             "optional": true,
//!             "name": "org.apache.kafka.connect.data.Date",
//!             "version": 1,
//!             "field": "HIRED"
//!         }
//!     ]
//! }
//! ```

use crate::error::{JsonConverterError, Result};
use connect_core::{Schema, SchemaBuilder, SchemaType};
use serde::{Deserialize, Serialize};

/// Serde mirror of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,

    #[serde(default)]
    pub optional: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    /// Member name, set only on the members of a struct's `fields`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<JsonSchema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<JsonSchema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Box<JsonSchema>>,
}

impl JsonSchema {
    /// Convert a schema, tagging it with `field` when it is a struct member.
    pub fn from_schema(schema: &Schema, field: Option<&str>) -> Self {
        let fields = (schema.schema_type() == SchemaType::Struct).then(|| {
            schema
                .fields()
                .iter()
                .map(|f| JsonSchema::from_schema(f.schema(), Some(f.name())))
                .collect()
        });
        let element = schema
            .value_schema()
            .map(|s| Box::new(JsonSchema::from_schema(s, None)));
        let (items, values) = match schema.schema_type() {
            SchemaType::Array => (element, None),
            SchemaType::Map => (None, element),
            _ => (None, None),
        };

        Self {
            schema_type: schema.schema_type(),
            optional: schema.is_optional(),
            name: schema.name().map(str::to_string),
            version: schema.version(),
            doc: schema.doc().map(str::to_string),
            field: field.map(str::to_string),
            fields,
            items,
            values,
        }
    }

    /// Rebuild the [`Schema`] this JSON schema describes.
    pub fn to_schema(&self) -> Result<Schema> {
        let mut builder = match self.schema_type {
            SchemaType::Array => {
                let items = self.items.as_ref().ok_or_else(|| {
                    JsonConverterError::InvalidSchema("array schema without 'items'".to_string())
                })?;
                SchemaBuilder::array(items.to_schema()?)
            }
            SchemaType::Map => {
                let values = self.values.as_ref().ok_or_else(|| {
                    JsonConverterError::InvalidSchema("map schema without 'values'".to_string())
                })?;
                SchemaBuilder::map(values.to_schema()?)
            }
            SchemaType::Struct => {
                let members = self.fields.as_ref().ok_or_else(|| {
                    JsonConverterError::InvalidSchema("struct schema without 'fields'".to_string())
                })?;
                let mut builder = SchemaBuilder::structure();
                for member in members {
                    let name = member.field.as_ref().ok_or_else(|| {
                        JsonConverterError::InvalidSchema(
                            "struct member without 'field' name".to_string(),
                        )
                    })?;
                    builder = builder.field(name.clone(), member.to_schema()?);
                }
                builder
            }
            primitive => SchemaBuilder::new(primitive),
        };

        if let Some(name) = &self.name {
            builder = builder.name(name.clone());
        }
        if let Some(version) = self.version {
            builder = builder.version(version);
        }
        if let Some(doc) = &self.doc {
            builder = builder.doc(doc.clone());
        }
        if self.optional {
            builder = builder.optional();
        }
        Ok(builder.build()?)
    }
}
