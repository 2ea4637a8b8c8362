//! JSON converter for cdc-connect.
//!
//! Implements [`connect_core::Converter`] on top of a self-describing JSON
//! envelope:
//!
//! ```text
//! Forward:  Value ─(schema, logical codecs)→ {"schema": ..., "payload": ...} → bytes
//! Reverse:  bytes → {"schema": ..., "payload": ...} ─(schema, logical codecs)→ Value
//! ```
//!
//! # Modules
//!
//! - [`schema`] - JSON form of a [`connect_core::Schema`]
//! - [`forward`] - Value → JSON
//! - [`reverse`] - JSON → Value
//! - [`config`] - `schemas.enable` and friends
//! - [`converter`] - the [`JsonConverter`] itself
//!
//! # Example
//!
//! ```rust
//! use connect_core::{Converter, SchemaBuilder, Value};
//! use connect_json::JsonConverter;
//!
//! let converter = JsonConverter::new();
//! let schema = SchemaBuilder::int32().build().unwrap();
//!
//! let bytes = converter
//!     .from_connect_data("orders", Some(&schema), &Value::Int32(7))
//!     .unwrap();
//! let back = converter.to_connect_data("orders", &bytes).unwrap();
//! assert_eq!(back.value(), &Value::Int32(7));
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod forward;
pub mod reverse;
pub mod schema;

pub use config::{JsonConverterConfig, SCHEMAS_ENABLE};
pub use converter::JsonConverter;
pub use error::{JsonConverterError, Result};
pub use forward::{ensure_inferable, to_json_envelope, value_to_json};
pub use reverse::{from_json_envelope, infer_value, json_to_value};
pub use schema::JsonSchema;
