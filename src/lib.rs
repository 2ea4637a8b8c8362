//! cdc-connect
//!
//! Turns captured database changes into self-describing, replay-addressable
//! records.
//!
//! # Flow
//!
//! ```text
//! Transaction + Operation ──┐
//!                           ├─ SourceRecordGenerator ─→ SourceRecord ─→ Converter ─→ bytes
//! key / payload Structs ────┘          (topic, partition, offset)
//! ```
//!
//! The data model, logical-type codecs and converter boundary live in
//! `connect-core`; `connect-json` provides a JSON converter and
//! `offset-store` persists source positions for resumption.
//!
//! # Example
//!
//! ```rust
//! use cdc_connect::{
//!     DefaultSourceRecordGenerator, OpType, Operation, SourceRecordGenerator, TableName,
//!     Transaction,
//! };
//! use chrono::Utc;
//! use connect_core::{single_entry, SchemaBuilder, Struct};
//!
//! let schema = SchemaBuilder::structure()
//!     .field("ID", SchemaBuilder::int64().build().unwrap())
//!     .build()
//!     .unwrap();
//! let payload = Struct::new(schema).unwrap().with("ID", 1i64).unwrap();
//!
//! let tx = Transaction::new("1.2.3", Utc::now(), 1);
//! let op = Operation::new(TableName::new("HR", "EMPLOYEES"), OpType::Insert, "000000001234", Utc::now());
//!
//! let record = DefaultSourceRecordGenerator::default().create_source_record(&tx, &op, None, payload);
//! assert_eq!(record.topic(), "HR.EMPLOYEES");
//! assert_eq!(record.source_partition(), &single_entry("position", "000000001234"));
//! ```

pub mod change;
pub mod error;
pub mod formatted;
pub mod generator;

pub use change::{OpType, Operation, TableName, Transaction};
pub use error::{FormatError, Result};
pub use formatted::{FormattedData, MAX_RECORDS};
pub use generator::{
    DefaultSourceRecordGenerator, GeneratorConfig, OffsetMode, PartitionMode,
    SourceRecordGenerator,
};
