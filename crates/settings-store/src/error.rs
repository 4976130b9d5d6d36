//! Error types for settings-store

use std::path::PathBuf;

/// Result type for settings-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in settings-store operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed settings line {line} in {path}: missing '=' in {content:?}")]
    Format {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("Invalid setting {key:?}: {reason}")]
    InvalidEntry { key: String, reason: &'static str },

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

    /// Whether this error came from a structurally invalid settings file.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}
