//! Storage error types.

use thiserror::Error;

/// Errors that can occur in storage engine operations.
///
/// These are faults of the engine itself. "Key absent" is not an error at this
/// level: point reads return `Ok(None)` for missing keys.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database could not be opened or created.
    #[error("failed to open database: {0}")]
    Open(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A transaction could not be started.
    #[error("transaction error: {0}")]
    Transaction(String),

    /// A write transaction failed to commit. Nothing from it was applied.
    #[error("commit failed: {0}")]
    Commit(String),

    /// The engine reported a table, read or write failure (including corruption).
    #[error("internal storage error: {0}")]
    Internal(String),
}

impl StorageError {
    /// Returns `true` if the error was raised while opening the engine.
    #[must_use]
    pub const fn is_open_error(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}

/// A specialized `Result` type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::Commit("disk full".to_string());
        assert_eq!(err.to_string(), "commit failed: disk full");

        let err = StorageError::Open("locked".to_string());
        assert!(err.is_open_error());
        assert!(!StorageError::Internal("x".to_string()).is_open_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: StorageError = io.into();
        assert!(matches!(err, StorageError::Io(_)));
        assert!(err.to_string().contains("nope"));
    }
}
