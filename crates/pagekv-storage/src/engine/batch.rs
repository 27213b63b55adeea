//! Buffered write operations for atomic commits.

/// A single pending write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Insert or overwrite a key.
    Put {
        /// The key.
        key: Vec<u8>,
        /// The value.
        value: Vec<u8>,
    },
    /// Delete a key. Absent keys are not an error.
    Delete {
        /// The key.
        key: Vec<u8>,
    },
}

impl WriteOp {
    /// The key this operation targets.
    #[must_use]
    pub fn key(&self) -> &[u8] {
        match self {
            Self::Put { key, .. } | Self::Delete { key } => key,
        }
    }
}

/// An ordered list of write operations applied by
/// [`StorageEngine::write`](super::StorageEngine::write) in a single transaction.
///
/// Building a batch never touches the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    /// Operations in the order they were added.
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    /// Create an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a put.
    pub fn put(&mut self, key: &[u8], value: &[u8]) {
        self.ops.push(WriteOp::Put { key: key.to_vec(), value: value.to_vec() });
    }

    /// Append a delete.
    pub fn delete(&mut self, key: &[u8]) {
        self.ops.push(WriteOp::Delete { key: key.to_vec() });
    }

    /// Discard every pending operation.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Number of pending operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if no operation is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Pending operations, in append order.
    pub fn iter(&self) -> std::slice::Iter<'_, WriteOp> {
        self.ops.iter()
    }
}

impl<'a> IntoIterator for &'a WriteBatch {
    type Item = &'a WriteOp;
    type IntoIter = std::slice::Iter<'a, WriteOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
