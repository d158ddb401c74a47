//! Error types for the fallible edges of the wall (config and snapshots).

use thiserror::Error;

/// Errors raised while loading configuration or (de)serializing snapshots.
///
/// Pointer interaction itself never fails; operations on missing entities are
/// silent no-ops.
#[derive(Debug, Error)]
pub enum WallError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for wall operations that can fail.
pub type WallResult<T> = Result<T, WallError>;
