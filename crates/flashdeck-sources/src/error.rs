//! Catalog source error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching a catalog.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The catalog file does not exist.
    #[error("catalog file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The catalog file could not be read.
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The server answered with an error status.
    #[error("HTTP {status} fetching {url}")]
    Http { status: u16, url: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}
