//! Error types for record decoding

use std::path::PathBuf;

/// Errors while decoding a records payload
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Payload is not a record list nor a paged envelope
    #[error("malformed records payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// IO error while reading a dataset file
    #[error("io error reading {path}: {source}")]
    Io {
        /// Dataset file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl DecodeError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
