//! Core storage engine traits.
//!
//! This module defines the boundary with the ordered key-value engine:
//!
//! - [`StorageEngine`] - Point reads and writes, atomic batches, raw iterators
//! - [`RawIterator`] - A seekable forward iterator over the engine's key order
//!
//! Keys are ordered lexicographically by their raw bytes.

use std::sync::Arc;

use super::{StorageResult, WriteBatch};

/// A key-value pair held by iterators.
pub type KeyValue = (Vec<u8>, Vec<u8>);

/// An ordered key-value storage engine.
///
/// Implementations must be thread-safe (`Send + Sync`). Concurrent access from
/// several callers relies on the engine's own guarantees: readers may run in
/// parallel and writers are serialized internally.
///
/// # Example
///
/// ```ignore
/// use pagekv_storage::{RawIterator, StorageEngine};
///
/// fn dump<E: StorageEngine>(engine: &E) -> StorageResult<()> {
///     let mut iter = engine.raw_iter(100)?;
///     iter.seek(b"")?;
///     while let (Some(key), Some(value)) = (iter.key(), iter.value()) {
///         println!("{key:?} = {value:?}");
///         iter.next()?;
///     }
///     Ok(())
/// }
/// ```
pub trait StorageEngine: Send + Sync {
    /// The raw iterator type for this engine.
    type Iterator<'a>: RawIterator
    where
        Self: 'a;

    /// Get the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only if the engine itself fails.
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>>;

    /// Insert or overwrite a key-value pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. No partial write is observable.
    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()>;

    /// Delete a key.
    ///
    /// Returns `Ok(true)` if the key was removed, `Ok(false)` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete(&self, key: &[u8]) -> StorageResult<bool>;

    /// Apply every operation of `batch`, in order, as one atomic write.
    ///
    /// Either all operations take effect or none do.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Commit`](super::StorageError::Commit) if the
    /// write could not be committed.
    fn write(&self, batch: &WriteBatch) -> StorageResult<()>;

    /// Open a raw iterator.
    ///
    /// `fetch_hint` sizes how many entries the iterator reads from the engine at
    /// a time. It never limits how far the iterator can advance.
    ///
    /// The iterator starts unpositioned; call [`RawIterator::seek`] first. It is
    /// released when dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transaction`](super::StorageError::Transaction)
    /// if a read view cannot be acquired.
    fn raw_iter(&self, fetch_hint: usize) -> StorageResult<Self::Iterator<'_>>;

    /// Flush any buffered data to durable storage.
    ///
    /// The default implementation does nothing, as most backends are durable on
    /// commit.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`](super::StorageError::Io) if the flush fails.
    fn flush(&self) -> StorageResult<()> {
        Ok(())
    }
}

/// A seekable forward iterator over an engine's keys.
///
/// ```ignore
/// let mut iter = engine.raw_iter(64)?;
/// iter.seek(b"user:")?;
/// while iter.valid() {
///     // iter.key(), iter.value()
///     iter.next()?;
/// }
/// ```
pub trait RawIterator {
    /// Position the iterator at the first key greater than or equal to `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine read fails.
    fn seek(&mut self, key: &[u8]) -> StorageResult<()>;

    /// Returns `true` while the iterator is positioned at an entry.
    fn valid(&self) -> bool;

    /// The key at the current position, or `None` when not valid.
    fn key(&self) -> Option<&[u8]>;

    /// The value at the current position, or `None` when not valid.
    fn value(&self) -> Option<&[u8]>;

    /// Advance to the next key. A no-op when the iterator is not valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine read fails.
    fn next(&mut self) -> StorageResult<()>;
}

// ============================================================================
// Blanket Implementations
// ============================================================================

/// Implement `StorageEngine` for `Arc<E>` to allow shared ownership of engines.
impl<E: StorageEngine> StorageEngine for Arc<E> {
    type Iterator<'a>
        = E::Iterator<'a>
    where
        Self: 'a;

    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &[u8]) -> StorageResult<bool> {
        (**self).delete(key)
    }

    fn write(&self, batch: &WriteBatch) -> StorageResult<()> {
        (**self).write(batch)
    }

    fn raw_iter(&self, fetch_hint: usize) -> StorageResult<Self::Iterator<'_>> {
        (**self).raw_iter(fetch_hint)
    }

    fn flush(&self) -> StorageResult<()> {
        (**self).flush()
    }
}
