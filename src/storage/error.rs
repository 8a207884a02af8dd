use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Storage-specific error types
///
/// Missing or duplicate titles are not errors; they are reported through
/// [`AddOutcome`](crate::storage::AddOutcome) and
/// [`EditOutcome`](crate::storage::EditOutcome).
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed catalog file {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unsupported storage type: {0}")]
    UnsupportedStorageType(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl StorageError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        StorageError::Malformed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
