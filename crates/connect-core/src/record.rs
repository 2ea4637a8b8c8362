//! Routed records and source positions.
//!
//! A [`SourceRecord`] is a [`ConnectRecord`] (topic, partition hint, key,
//! value, timestamp) plus the source position it was read from:
//!
//! - `source_partition` identifies the logical input stream
//! - `source_offset` identifies a resumable position within that stream
//!
//! Both position maps are opaque to this crate. Only the producer of
//! positions and the consumer resuming from them interpret their entries.

use crate::schema::Schema;
use crate::values::SchemaAndValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Source Positions
// ============================================================================

/// Scalar stored in a source position map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionValue {
    Int(i64),
    String(String),
}

impl PositionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PositionValue::String(s) => Some(s),
            PositionValue::Int(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PositionValue::Int(i) => Some(*i),
            PositionValue::String(_) => None,
        }
    }
}

impl From<i64> for PositionValue {
    fn from(v: i64) -> Self {
        PositionValue::Int(v)
    }
}

impl From<String> for PositionValue {
    fn from(v: String) -> Self {
        PositionValue::String(v)
    }
}

impl From<&str> for PositionValue {
    fn from(v: &str) -> Self {
        PositionValue::String(v.to_string())
    }
}

impl fmt::Display for PositionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionValue::Int(i) => write!(f, "{i}"),
            PositionValue::String(s) => f.write_str(s),
        }
    }
}

/// String-keyed position map (`sourcePartition` or `sourceOffset`).
pub type PositionMap = BTreeMap<String, PositionValue>;

/// Build a single-entry position map.
pub fn single_entry(key: &str, value: impl Into<PositionValue>) -> PositionMap {
    PositionMap::from([(key.to_string(), value.into())])
}

fn write_position_map(f: &mut fmt::Formatter<'_>, map: &PositionMap) -> fmt::Result {
    f.write_str("{")?;
    for (i, (k, v)) in map.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{k}={v}")?;
    }
    f.write_str("}")
}

// ============================================================================
// ConnectRecord
// ============================================================================

/// Generic routed record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectRecord {
    topic: String,
    kafka_partition: Option<i32>,
    key: Option<SchemaAndValue>,
    value: SchemaAndValue,
    timestamp: Option<i64>,
}

impl ConnectRecord {
    pub fn new(
        topic: impl Into<String>,
        kafka_partition: Option<i32>,
        key: Option<SchemaAndValue>,
        value: SchemaAndValue,
        timestamp: Option<i64>,
    ) -> Self {
        Self {
            topic: topic.into(),
            kafka_partition,
            key,
            value,
            timestamp,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Explicit partition hint; `None` lets the transport choose.
    pub fn kafka_partition(&self) -> Option<i32> {
        self.kafka_partition
    }

    pub fn key(&self) -> Option<&SchemaAndValue> {
        self.key.as_ref()
    }

    pub fn key_schema(&self) -> Option<&Arc<Schema>> {
        self.key.as_ref().and_then(SchemaAndValue::schema)
    }

    pub fn value(&self) -> &SchemaAndValue {
        &self.value
    }

    pub fn value_schema(&self) -> Option<&Arc<Schema>> {
        self.value.schema()
    }

    /// Record timestamp in milliseconds since the epoch.
    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }
}

impl fmt::Display for ConnectRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConnectRecord{{topic={}", self.topic)?;
        if let Some(p) = self.kafka_partition {
            write!(f, ", kafkaPartition={p}")?;
        }
        if let Some(key) = &self.key {
            write!(f, ", key={:?}", key.value())?;
        }
        write!(f, ", value={:?}", self.value.value())?;
        if let Some(ts) = self.timestamp {
            write!(f, ", timestamp={ts}")?;
        }
        f.write_str("}")
    }
}

// ============================================================================
// SourceRecord
// ============================================================================

/// Routed record plus the source position it was produced from.
///
/// Built once per change event and never mutated afterwards; equality and
/// hashing cover the routed record and both position maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRecord {
    record: ConnectRecord,
    source_partition: PositionMap,
    source_offset: PositionMap,
}

impl SourceRecord {
    /// Record carrying both a key and a value.
    pub fn keyed(
        source_partition: PositionMap,
        source_offset: PositionMap,
        topic: impl Into<String>,
        key: SchemaAndValue,
        value: SchemaAndValue,
    ) -> Self {
        Self {
            record: ConnectRecord::new(topic, None, Some(key), value, None),
            source_partition,
            source_offset,
        }
    }

    /// Record carrying only a value.
    pub fn unkeyed(
        source_partition: PositionMap,
        source_offset: PositionMap,
        topic: impl Into<String>,
        value: SchemaAndValue,
    ) -> Self {
        Self {
            record: ConnectRecord::new(topic, None, None, value, None),
            source_partition,
            source_offset,
        }
    }

    pub fn with_kafka_partition(mut self, kafka_partition: i32) -> Self {
        self.record.kafka_partition = Some(kafka_partition);
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.record.timestamp = Some(timestamp);
        self
    }

    /// Copy of this record re-routed with new routing and payload, keeping the
    /// source position.
    pub fn new_record(
        &self,
        topic: impl Into<String>,
        kafka_partition: Option<i32>,
        key: Option<SchemaAndValue>,
        value: SchemaAndValue,
        timestamp: Option<i64>,
    ) -> Self {
        Self {
            record: ConnectRecord::new(topic, kafka_partition, key, value, timestamp),
            source_partition: self.source_partition.clone(),
            source_offset: self.source_offset.clone(),
        }
    }

    pub fn record(&self) -> &ConnectRecord {
        &self.record
    }

    pub fn source_partition(&self) -> &PositionMap {
        &self.source_partition
    }

    pub fn source_offset(&self) -> &PositionMap {
        &self.source_offset
    }

    pub fn topic(&self) -> &str {
        self.record.topic()
    }

    pub fn kafka_partition(&self) -> Option<i32> {
        self.record.kafka_partition()
    }

    pub fn key(&self) -> Option<&SchemaAndValue> {
        self.record.key()
    }

    pub fn key_schema(&self) -> Option<&Arc<Schema>> {
        self.record.key_schema()
    }

    pub fn value(&self) -> &SchemaAndValue {
        self.record.value()
    }

    pub fn value_schema(&self) -> Option<&Arc<Schema>> {
        self.record.value_schema()
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.record.timestamp()
    }

    pub fn is_keyed(&self) -> bool {
        self.record.key.is_some()
    }
}

impl fmt::Display for SourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SourceRecord{sourcePartition=")?;
        write_position_map(f, &self.source_partition)?;
        f.write_str(", sourceOffset=")?;
        write_position_map(f, &self.source_offset)?;
        write!(f, "}} {}", self.record)
    }
}
