//! I/O error types.

use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structurally valid JSON that violates the event contract.
    #[error("invalid event record: {0}")]
    InvalidRecord(String),

    /// Core library error.
    #[error("core error: {0}")]
    Core(#[from] voxana_core::Error),
}
