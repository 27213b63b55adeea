//! Redb raw iterator.
//!
//! The iterator holds a read transaction for its whole lifetime, so it sees one
//! consistent snapshot. Entries are loaded in batches of at most `fetch_size`,
//! fetching the next batch on demand as the iterator advances, instead of
//! materializing the table upfront.

use std::ops::Bound;

use redb::ReadTransaction;

use crate::engine::{KeyValue, RawIterator, StorageError, StorageResult};

use super::tables::DATA_TABLE;

/// Upper bound on entries loaded per batch.
pub const MAX_FETCH_SIZE: usize = 1000;

/// A batched forward iterator over a Redb snapshot.
///
/// Dropping the iterator releases its read transaction.
pub struct RedbIterator {
    /// The snapshot this iterator reads from.
    tx: ReadTransaction,
    /// Current batch of entries, ascending.
    batch: Vec<KeyValue>,
    /// Position within the current batch.
    position: usize,
    /// Maximum entries per batch.
    fetch_size: usize,
    /// Whether entries may exist after the current batch.
    has_more: bool,
}

impl RedbIterator {
    /// Create an unpositioned iterator over `tx`.
    pub(crate) fn new(tx: ReadTransaction, fetch_hint: usize) -> Self {
        Self {
            tx,
            batch: Vec::new(),
            position: 0,
            fetch_size: fetch_hint.clamp(1, MAX_FETCH_SIZE),
            has_more: false,
        }
    }

    /// Load up to `fetch_size` entries starting at `start`.
    fn fetch(&self, start: Bound<&[u8]>) -> StorageResult<Vec<KeyValue>> {
        let table = match self.tx.open_table(DATA_TABLE) {
            Ok(table) => table,
            // Nothing has been written yet
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::Internal(e.to_string())),
        };

        let bounds: (Bound<&[u8]>, Bound<&[u8]>) = (start, Bound::Unbounded);
        let range =
            table.range::<&[u8]>(bounds).map_err(|e| StorageError::Internal(e.to_string()))?;

        let mut entries = Vec::with_capacity(self.fetch_size);
        for result in range.take(self.fetch_size) {
            let (k, v) = result.map_err(|e| StorageError::Internal(e.to_string()))?;
            entries.push((k.value().to_vec(), v.value().to_vec()));
        }
        Ok(entries)
    }

    /// Replace the current batch, positioned at its first entry.
    fn load(&mut self, entries: Vec<KeyValue>) {
        self.has_more = entries.len() >= self.fetch_size;
        self.batch = entries;
        self.position = 0;
    }
}

impl RawIterator for RedbIterator {
    fn seek(&mut self, key: &[u8]) -> StorageResult<()> {
        let entries = self.fetch(Bound::Included(key))?;
        self.load(entries);
        Ok(())
    }

    fn valid(&self) -> bool {
        self.position < self.batch.len()
    }

    fn key(&self) -> Option<&[u8]> {
        self.batch.get(self.position).map(|(k, _)| k.as_slice())
    }

    fn value(&self) -> Option<&[u8]> {
        self.batch.get(self.position).map(|(_, v)| v.as_slice())
    }

    fn next(&mut self) -> StorageResult<()> {
        if !self.valid() {
            return Ok(());
        }

        self.position += 1;
        if self.position < self.batch.len() || !self.has_more {
            return Ok(());
        }

        // Continue after the last key of the exhausted batch
        let entries = match self.batch.last() {
            Some((last, _)) => self.fetch(Bound::Excluded(last.as_slice()))?,
            None => Vec::new(),
        };
        self.load(entries);
        Ok(())
    }
}
