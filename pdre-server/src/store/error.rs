//! Storage error types.

use std::path::PathBuf;

use crate::domain::{AreaId, ObjectId};

/// Errors from the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No protected area with this id
    #[error("protected area {0} not found")]
    AreaNotFound(AreaId),

    /// No tourism object with this id
    #[error("tourism object {0} not found")]
    ObjectNotFound(ObjectId),

    /// No calculation record with this id
    #[error("calculation {0} not found")]
    CalculationNotFound(u64),

    /// Reading or writing a dataset file failed
    #[error("dataset file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset JSON was malformed
    #[error("dataset JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
