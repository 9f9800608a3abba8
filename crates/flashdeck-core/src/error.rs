//! Error types for the study engine and its persistence layer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](crate::traits::KeyValueStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be encoded for storage.
    #[error("failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by study session commands.
///
/// Operations on an empty view are not errors; they are no-ops.
#[derive(Debug, Error)]
pub enum StudyError {
    /// A group toggle named a group that was never discovered.
    #[error("unknown group: {0}")]
    UnknownGroup(String),

    /// Persisting the new state failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
