//! Error types for source discovery and reading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a run. Malformed rows are not errors; see
/// [`SkipReason`](liftrec_types::SkipReason).
#[derive(Debug, Error)]
pub enum SourceError {
    /// I/O error opening or reading a source.
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("cannot list sources: {0}")]
    Walk(#[from] walkdir::Error),

    /// CSV tokenization failed (unreadable bytes, invalid UTF-8).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The feed has no source with this name.
    #[error("source not found: {0}")]
    NotFound(String),
}

/// Convenience type alias for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
