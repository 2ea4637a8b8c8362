//! Source offset management for cdc-connect
//!
//! Persists the `(source_partition, source_offset)` position carried by every
//! [`connect_core::SourceRecord`], so a restarted source can resume from the
//! last delivered change.
//!
//! ## Storage Backends
//!
//! - `MemoryOffsetStore` - Keeps offsets in process memory
//! - `FilesystemOffsetStore` - Stores offsets in a JSON file
//!
//! `OffsetStorage` selects a backend from configuration.
//!
//! # Example
//!
//! ```rust
//! use connect_core::single_entry;
//! use offset_store::{OffsetStorage, OffsetStore};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = OffsetStorage::Memory.open();
//! let partition = single_entry("position", "000000001234");
//!
//! store.commit(&partition, &single_entry("timestamp", 1_700_000_000_000i64)).await?;
//! let latest = store.read(&partition).await?;
//! assert!(latest.is_some());
//! # Ok(())
//! # }
//! ```

mod config;
mod filesystem;
mod memory;
pub mod store;


pub use config::{OffsetStorage, DEFAULT_OFFSET_DIR};
pub use filesystem::{FilesystemOffsetStore, OFFSETS_FILE};
pub use memory::MemoryOffsetStore;
pub use store::{OffsetStore, StoredOffset};
