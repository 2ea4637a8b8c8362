//! Error types for the cdc-connect crate.

use thiserror::Error;

/// Errors raised while assembling formatted operation data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Formatted data holds at most {capacity} records")]
    Capacity { capacity: usize },
}

/// Result type alias for cdc-connect operations.
pub type Result<T> = std::result::Result<T, FormatError>;
