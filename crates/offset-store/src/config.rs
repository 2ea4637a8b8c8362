//! Storage backend selection for offsets.

use serde::{Deserialize, Serialize};

use crate::{FilesystemOffsetStore, MemoryOffsetStore, OffsetStore};

/// Default directory for filesystem offsets.
pub const DEFAULT_OFFSET_DIR: &str = ".cdc-connect-offsets";

/// Where committed source offsets are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OffsetStorage {
    /// Process-local; offsets are lost on restart.
    Memory,
    /// JSON file under `dir`.
    Filesystem { dir: String },
}

impl Default for OffsetStorage {
    fn default() -> Self {
        OffsetStorage::Filesystem {
            dir: DEFAULT_OFFSET_DIR.to_string(),
        }
    }
}

impl OffsetStorage {
    /// Build the configured backend.
    pub fn open(&self) -> Box<dyn OffsetStore> {
        match self {
            OffsetStorage::Memory => Box::new(MemoryOffsetStore::new()),
            OffsetStorage::Filesystem { dir } => Box::new(FilesystemOffsetStore::new(dir)),
        }
    }
}
