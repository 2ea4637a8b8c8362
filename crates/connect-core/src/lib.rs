//! Core data model for cdc-connect.
//!
//! This crate provides the types every other crate in the workspace builds on:
//!
//! - [`Schema`] / [`SchemaBuilder`] - value descriptions, including struct schemas
//! - [`Field`] - `(name, index, schema)` member of a struct schema
//! - [`UtcInstant`] - full-range logical temporal value
//! - [`LogicalType`] with the [`Date`], [`Time`] and [`Timestamp`] codecs
//! - [`Value`] / [`Struct`] / [`SchemaAndValue`] - dynamically typed data
//! - [`SourceRecord`] - routed record plus its resumable source position
//! - [`Converter`] - boundary between structured data and bytes
//!
//! # Architecture
//!
//! ```text
//! connect-core (this crate)
//!    │
//!    ├─── connect-json    (Converter implementation: JSON envelope)
//!    ├─── offset-store    (persists SourceRecord positions for resumption)
//!    └─── cdc-connect     (change events → SourceRecord)
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use connect_core::{Date, LogicalCodec, UtcInstant};
//!
//! let schema = Date::schema();
//! let day = UtcInstant::from(Utc.with_ymd_and_hms(1970, 1, 11, 0, 0, 0).unwrap());
//!
//! assert_eq!(Date::encode(&schema, &day).unwrap(), 10);
//! assert_eq!(Date::decode(&schema, 10).unwrap(), day);
//!
//! // Every int32 day count decodes, even past chrono's calendar.
//! assert!(Date::decode(&schema, i32::MAX).is_ok());
//! ```

pub mod converter;
pub mod error;
pub mod field;
pub mod instant;
pub mod logical;
pub mod record;
pub mod schema;
pub mod values;

// Re-exports for convenience
pub use converter::{Converter, ConverterConfigs, ConverterType};
pub use error::{ConverterError, DataError, Result};
pub use field::Field;
pub use instant::UtcInstant;
pub use logical::{
    Date, LogicalCodec, LogicalType, Time, Timestamp, LOGICAL_VERSION, MILLIS_PER_DAY,
};
pub use record::{single_entry, ConnectRecord, PositionMap, PositionValue, SourceRecord};
pub use schema::{Schema, SchemaBuilder, SchemaType};
pub use values::{SchemaAndValue, Struct, Value};
