//! Source record generation.
//!
//! Turns one captured operation plus its already-built key and payload structs
//! into a [`SourceRecord`]:
//!
//! - topic: the table's original name (`schema.table` or `catalog.schema.table`)
//! - source partition: `{"position": <capture position>}` by default
//! - source offset: `{"timestamp": <epoch millis>}` by default
//!
//! Partitioning on the capture position spreads one table's changes across
//! partitions, so ordering within the stream only survives through the offset.

use crate::change::{Operation, Transaction};
use crate::formatted::FormattedData;
use chrono::Utc;
use connect_core::{single_entry, PositionMap, SchemaAndValue, SourceRecord, Struct};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const POSITION_KEY: &str = "position";
pub const TABLE_KEY: &str = "table";
pub const TIMESTAMP_KEY: &str = "timestamp";

// ============================================================================
// Configuration
// ============================================================================

/// How the source partition map is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionMode {
    /// `{"position": op.position()}`.
    #[default]
    Position,
    /// `{"table": topic}`.
    Table,
}

/// How the source offset map is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetMode {
    /// `{"timestamp": now}`. Not monotonic across replays, so resuming from it
    /// can skip or repeat changes.
    #[default]
    WallClock,
    /// `{"timestamp": op.timestamp()}`.
    OperationTimestamp,
    /// `{"position": op.position()}`. Reproducible on replay.
    Position,
}

/// Settings for [`DefaultSourceRecordGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub partition_mode: PartitionMode,
    pub offset_mode: OffsetMode,
}

// ============================================================================
// Generator
// ============================================================================

/// Builds source records from captured operations.
///
/// Implementations must be stateless across calls so one instance can serve
/// concurrent producers.
pub trait SourceRecordGenerator: Send + Sync {
    /// Build the record for one `(key, payload)` pair. A present key yields a
    /// keyed record; an absent key yields a record carrying only the payload.
    fn create_source_record(
        &self,
        transaction: &Transaction,
        operation: &Operation,
        key: Option<Struct>,
        payload: Struct,
    ) -> SourceRecord;

    /// Build one record per accumulated pair, in insertion order.
    fn create_source_records(
        &self,
        transaction: &Transaction,
        operation: &Operation,
        data: FormattedData,
    ) -> Vec<SourceRecord> {
        data.into_entries()
            .into_iter()
            .map(|(key, payload)| self.create_source_record(transaction, operation, key, payload))
            .collect()
    }
}

/// Topic per table, partition and offset per [`GeneratorConfig`].
#[derive(Debug, Clone, Default)]
pub struct DefaultSourceRecordGenerator {
    config: GeneratorConfig,
}

impl DefaultSourceRecordGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn partition(&self, topic: &str, operation: &Operation) -> PositionMap {
        match self.config.partition_mode {
            PartitionMode::Position => single_entry(POSITION_KEY, operation.position()),
            PartitionMode::Table => single_entry(TABLE_KEY, topic),
        }
    }

    fn offset(&self, operation: &Operation) -> PositionMap {
        match self.config.offset_mode {
            OffsetMode::WallClock => single_entry(TIMESTAMP_KEY, Utc::now().timestamp_millis()),
            OffsetMode::OperationTimestamp => {
                single_entry(TIMESTAMP_KEY, operation.timestamp().timestamp_millis())
            }
            OffsetMode::Position => single_entry(POSITION_KEY, operation.position()),
        }
    }
}

impl SourceRecordGenerator for DefaultSourceRecordGenerator {
    fn create_source_record(
        &self,
        transaction: &Transaction,
        operation: &Operation,
        key: Option<Struct>,
        payload: Struct,
    ) -> SourceRecord {
        let topic = operation.table().original_name();
        let partition = self.partition(&topic, operation);
        let offset = self.offset(operation);

        debug!(
            "Generating {} record for topic '{topic}' (tx {}, position {}, keyed: {})",
            operation.op_type().as_str(),
            transaction.id(),
            operation.position(),
            key.is_some()
        );

        let value = SchemaAndValue::from_struct(payload);
        match key {
            Some(key) => SourceRecord::keyed(
                partition,
                offset,
                topic,
                SchemaAndValue::from_struct(key),
                value,
            ),
            None => SourceRecord::unkeyed(partition, offset, topic, value),
        }
    }
}
