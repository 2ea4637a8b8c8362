//! Filesystem-based offset storage implementation.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use connect_core::PositionMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::store::{OffsetStore, StoredOffset};

/// Name of the offsets file inside the store directory.
pub const OFFSETS_FILE: &str = "offsets.json";

/// Filesystem implementation of OffsetStore trait.
///
/// Keeps every partition's latest offset in a single JSON file, rewritten in
/// full (through a temporary file and a rename) on each commit.
pub struct FilesystemOffsetStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FilesystemOffsetStore {
    /// Create a new FilesystemOffsetStore with the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the directory path.
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path(&self) -> PathBuf {
        self.dir.join(OFFSETS_FILE)
    }

    fn load(path: &Path) -> Result<Vec<StoredOffset>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read offsets from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Corrupt offsets file {}", path.display()))
    }
}

#[async_trait]
impl OffsetStore for FilesystemOffsetStore {
    async fn commit(&self, partition: &PositionMap, offset: &PositionMap) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("filesystem offset store lock poisoned"))?;

        std::fs::create_dir_all(&self.dir)?;
        let path = self.path();
        let mut offsets = Self::load(&path)?;

        let stored = StoredOffset {
            partition: partition.clone(),
            offset: offset.clone(),
            committed_at: Utc::now(),
        };
        match offsets.iter_mut().find(|o| &o.partition == partition) {
            Some(existing) => *existing = stored,
            None => offsets.push(stored),
        }

        let tmp = self.dir.join(format!("{OFFSETS_FILE}.tmp"));
        std::fs::write(&tmp, serde_json::to_string_pretty(&offsets)?)?;
        std::fs::rename(&tmp, &path)?;
        tracing::info!(
            "Committed offset {offset:?} for partition {partition:?} to {}",
            path.display()
        );
        Ok(())
    }

    async fn read(&self, partition: &PositionMap) -> Result<Option<StoredOffset>> {
        let offsets = Self::load(&self.path())?;
        Ok(offsets.into_iter().find(|o| &o.partition == partition))
    }
}
