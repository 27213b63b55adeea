//! Error types for `pagekv`.
//!
//! This module provides the [`enum@Error`] type returned by every store, batch
//! and scan operation.

use std::path::PathBuf;

use pagekv_storage::StorageError;
use thiserror::Error;

/// Errors that can occur when using a `pagekv` store.
///
/// [`Error::NotFound`] is ordinary control flow for point reads and is kept
/// distinct from [`Error::Storage`], which signals a failing engine.
#[derive(Debug, Error)]
pub enum Error {
    /// An argument was rejected before reaching the engine.
    #[error("invalid argument: {0}")]
    Validation(String),

    /// The requested key does not exist.
    #[error("key not found")]
    NotFound,

    /// The storage engine failed (I/O, corruption, aborted commit).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The store directory could not be created or is not usable.
    #[error("cannot prepare store directory {}: {source}", .path.display())]
    Io {
        /// The directory that was being prepared.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The storage engine could not be opened inside the store directory.
    #[error("failed to open store at {}: {source}", .path.display())]
    Open {
        /// The store directory.
        path: PathBuf,
        /// The engine error.
        source: StorageError,
    },
}

impl Error {
    /// Returns `true` if the error is part of normal control flow.
    ///
    /// Missing keys and rejected arguments are recoverable; storage, I/O and
    /// open failures are not.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound | Self::Validation(_))
    }

    /// Returns `true` if this is a missing-key error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Returns `true` if the storage engine failed during an operation.
    #[must_use]
    pub const fn is_storage_fault(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Returns `true` if an argument was rejected.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// A specialized `Result` type for `pagekv` operations.
pub type Result<T> = std::result::Result<T, Error>;
