//! Redb storage engine implementation.
//!
//! This module provides the `RedbEngine` type which implements the
//! `StorageEngine` trait using the Redb embedded database.

use std::path::Path;

use redb::{Database, Table};
use tracing::{debug, trace};

use crate::engine::{StorageEngine, StorageError, StorageResult, WriteBatch, WriteOp};

use super::iterator::RedbIterator;
use super::tables::DATA_TABLE;

/// The physical table type handed to write closures.
type DataTable<'txn> = Table<'txn, &'static [u8], &'static [u8]>;

/// Configuration options for the Redb storage engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedbConfig {
    /// Cache size in bytes.
    /// If not set, uses Redb's default.
    pub cache_size: Option<usize>,
}

impl RedbConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cache size.
    #[must_use]
    pub const fn cache_size(mut self, size: usize) -> Self {
        self.cache_size = Some(size);
        self
    }
}

/// A storage engine backed by Redb.
///
/// Redb is a pure-Rust embedded database with ACID transactions. Readers work
/// on MVCC snapshots and run concurrently; write transactions are serialized by
/// Redb itself, so the engine needs no locking of its own.
///
/// # Example
///
/// ```ignore
/// use pagekv_storage::backends::RedbEngine;
/// use pagekv_storage::StorageEngine;
///
/// let engine = RedbEngine::open("data.redb")?;
/// engine.put(b"user:1", b"Alice")?;
/// assert_eq!(engine.get(b"user:1")?, Some(b"Alice".to_vec()));
/// ```
pub struct RedbEngine {
    /// The underlying Redb database.
    db: Database,
}

impl RedbEngine {
    /// Open or create a database file at the given path with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::open_with_config(path, RedbConfig::default())
    }

    /// Open or create a database file at the given path with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be opened or created.
    pub fn open_with_config(path: impl AsRef<Path>, config: RedbConfig) -> StorageResult<Self> {
        let path = path.as_ref();
        let mut builder = Database::builder();

        if let Some(cache_size) = config.cache_size {
            builder.set_cache_size(cache_size);
        }

        let db = builder.create(path).map_err(|e| StorageError::Open(e.to_string()))?;
        debug!(path = %path.display(), "opened redb database");

        Ok(Self { db })
    }

    /// Create an in-memory database.
    ///
    /// The database will be lost when the engine is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be created.
    pub fn in_memory() -> StorageResult<Self> {
        let db = Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .map_err(|e| StorageError::Open(e.to_string()))?;

        Ok(Self { db })
    }

    /// Get the underlying Redb database.
    pub const fn inner(&self) -> &Database {
        &self.db
    }

    /// Run `apply` against the data table inside one write transaction.
    ///
    /// The transaction is committed only if `apply` succeeds; otherwise it is
    /// aborted and nothing it did is visible.
    fn commit_with<R>(
        &self,
        apply: impl FnOnce(&mut DataTable<'_>) -> StorageResult<R>,
    ) -> StorageResult<R> {
        let tx = self.db.begin_write().map_err(|e| StorageError::Transaction(e.to_string()))?;

        let applied = match tx.open_table(DATA_TABLE) {
            Ok(mut table) => apply(&mut table),
            Err(e) => Err(StorageError::Internal(e.to_string())),
        };

        match applied {
            Ok(result) => {
                tx.commit().map_err(|e| StorageError::Commit(e.to_string()))?;
                Ok(result)
            }
            Err(err) => {
                // Ignore abort result - the original error is the one to report
                drop(tx.abort());
                Err(err)
            }
        }
    }
}

impl StorageEngine for RedbEngine {
    type Iterator<'a> = RedbIterator;

    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        let tx = self.db.begin_read().map_err(|e| StorageError::Transaction(e.to_string()))?;

        match tx.open_table(DATA_TABLE) {
            Ok(table) => {
                let value = table
                    .get(key)
                    .map_err(|e| StorageError::Internal(e.to_string()))?
                    .map(|guard| guard.value().to_vec());
                Ok(value)
            }
            // Nothing has been written yet
            Err(redb::TableError::TableDoesNotExist(_)) => Ok(None),
            Err(e) => Err(StorageError::Internal(e.to_string())),
        }
    }

    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        self.commit_with(|table| {
            table.insert(key, value).map_err(|e| StorageError::Internal(e.to_string()))?;
            Ok(())
        })
    }

    fn delete(&self, key: &[u8]) -> StorageResult<bool> {
        self.commit_with(|table| {
            let removed =
                table.remove(key).map_err(|e| StorageError::Internal(e.to_string()))?.is_some();
            Ok(removed)
        })
    }

    fn write(&self, batch: &WriteBatch) -> StorageResult<()> {
        self.commit_with(|table| {
            for op in batch {
                match op {
                    WriteOp::Put { key, value } => {
                        table
                            .insert(key.as_slice(), value.as_slice())
                            .map_err(|e| StorageError::Internal(e.to_string()))?;
                    }
                    WriteOp::Delete { key } => {
                        table
                            .remove(key.as_slice())
                            .map_err(|e| StorageError::Internal(e.to_string()))?;
                    }
                }
            }
            Ok(())
        })?;

        trace!(ops = batch.len(), "committed write batch");
        Ok(())
    }

    fn raw_iter(&self, fetch_hint: usize) -> StorageResult<Self::Iterator<'_>> {
        let tx = self.db.begin_read().map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(RedbIterator::new(tx, fetch_hint))
    }
}

// RedbEngine is Send + Sync because redb::Database is.
