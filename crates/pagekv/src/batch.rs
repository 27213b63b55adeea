//! Atomic write batches.

use pagekv_storage::{StorageEngine, WriteBatch};
use tracing::{debug, trace};

use crate::error::Result;

/// A set of puts and deletes committed to a store as one unit.
///
/// Operations are buffered in the order they are added and never touch the
/// engine until [`Batch::write`]. Created by [`Store::new_batch`](crate::Store::new_batch).
///
/// ```ignore
/// let mut batch = store.new_batch();
/// batch.put(b"user:1", b"Alice").delete(b"user:0");
/// batch.write()?;
/// ```
#[must_use = "a batch does nothing until it is written"]
pub struct Batch<'a, E: StorageEngine> {
    engine: &'a E,
    ops: WriteBatch,
}

impl<'a, E: StorageEngine> Batch<'a, E> {
    pub(crate) fn new(engine: &'a E) -> Self {
        Self { engine, ops: WriteBatch::new() }
    }

    /// Queue an insert or overwrite of `key`.
    pub fn put(&mut self, key: &[u8], value: &[u8]) -> &mut Self {
        self.ops.put(key, value);
        self
    }

    /// Queue a delete of `key`. Deleting an absent key is not an error.
    pub fn delete(&mut self, key: &[u8]) -> &mut Self {
        self.ops.delete(key);
        self
    }

    /// Discard all queued operations. The batch can be reused afterwards.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Number of queued operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Apply every queued operation, in order, as a single atomic write.
    ///
    /// Either all operations take effect or none do. An empty batch commits
    /// as a no-op. The batch is consumed either way.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`](crate::Error::Storage) if the engine cannot
    /// commit; no operation from the batch has been applied in that case.
    pub fn write(self) -> Result<()> {
        if self.ops.is_empty() {
            trace!("empty batch, nothing to commit");
            return Ok(());
        }

        self.engine.write(&self.ops)?;
        debug!(ops = self.ops.len(), "batch committed");
        Ok(())
    }
}

impl<E: StorageEngine> std::fmt::Debug for Batch<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Batch").field("ops", &self.ops).finish_non_exhaustive()
    }
}
