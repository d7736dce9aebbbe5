//! Storage error types.

use std::path::PathBuf;

/// Errors reading or writing the snapshot file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot content could not be (de)serialized
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot content is well-formed but inconsistent
    #[error("invalid snapshot: {message}")]
    Invalid { message: String },
}
