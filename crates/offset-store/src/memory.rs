//! In-memory offset storage, lost on restart.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use connect_core::PositionMap;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::store::{OffsetStore, StoredOffset};

/// In-memory implementation of OffsetStore trait.
#[derive(Debug, Default)]
pub struct MemoryOffsetStore {
    offsets: Mutex<BTreeMap<PositionMap, StoredOffset>>,
}

impl MemoryOffsetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of partitions with a committed offset.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<PositionMap, StoredOffset>>> {
        self.offsets
            .lock()
            .map_err(|_| anyhow!("memory offset store lock poisoned"))
    }
}

#[async_trait]
impl OffsetStore for MemoryOffsetStore {
    async fn commit(&self, partition: &PositionMap, offset: &PositionMap) -> Result<()> {
        let stored = StoredOffset {
            partition: partition.clone(),
            offset: offset.clone(),
            committed_at: Utc::now(),
        };
        self.lock()?.insert(partition.clone(), stored);
        tracing::debug!("Committed offset {offset:?} for partition {partition:?}");
        Ok(())
    }

    async fn read(&self, partition: &PositionMap) -> Result<Option<StoredOffset>> {
        Ok(self.lock()?.get(partition).cloned())
    }
}
