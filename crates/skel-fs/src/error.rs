//! Error types for skel-fs

use std::path::PathBuf;

/// Result type for skel-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in skel-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid fingerprint: {value}")]
    InvalidFingerprint { value: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
