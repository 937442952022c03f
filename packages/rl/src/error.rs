use thiserror::Error;

/// Failures around the persisted value table.
///
/// None of these are fatal: loading falls back to the all-zero table and a
/// failed save after a learning update is logged and counted.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("malformed value table: {0}")]
    MalformedTable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
