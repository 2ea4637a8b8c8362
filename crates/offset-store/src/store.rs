//! Offset storage trait and types
//!
//! This module defines the OffsetStore trait for backend-agnostic persistence
//! of source positions, plus shared types.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use connect_core::{PositionMap, SourceRecord};
use serde::{Deserialize, Serialize};

/// Offset data stored in a backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredOffset {
    /// Source partition the offset belongs to (e.g. `{"position": "..."}`)
    pub partition: PositionMap,
    /// Latest committed offset within the partition
    pub offset: PositionMap,
    /// Timestamp when the offset was committed
    pub committed_at: DateTime<Utc>,
}

/// Trait for offset storage operations.
///
/// Each source partition keeps only its latest committed offset; a commit
/// replaces whatever was stored for that partition before. Implementations:
/// - In-memory storage (`MemoryOffsetStore`)
/// - Filesystem storage (`FilesystemOffsetStore`)
#[async_trait]
pub trait OffsetStore: Send + Sync {
    /// Store the offset reached within a source partition.
    async fn commit(&self, partition: &PositionMap, offset: &PositionMap) -> Result<()>;

    /// Read the latest committed offset for a source partition.
    ///
    /// Returns None if nothing was committed for it.
    async fn read(&self, partition: &PositionMap) -> Result<Option<StoredOffset>>;

    /// Commit the position carried by a delivered record.
    async fn commit_record(&self, record: &SourceRecord) -> Result<()> {
        self.commit(record.source_partition(), record.source_offset())
            .await
    }
}
