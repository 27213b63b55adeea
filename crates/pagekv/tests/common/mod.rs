//! Shared helpers for `pagekv` integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use pagekv::{RawIterator, RedbEngine, StorageEngine, StorageError, Store, WriteBatch};
use pagekv_storage::backends::RedbIterator;
use pagekv_storage::StorageResult;

/// Switches and counters shared between a [`FaultyEngine`] and its iterators.
#[derive(Debug, Default)]
pub struct Faults {
    /// Fail every write, put and delete.
    pub fail_writes: AtomicBool,
    /// Fail every point read.
    pub fail_reads: AtomicBool,
    /// Fail an iterator advance once this many advances succeeded.
    pub fail_advance_after: AtomicUsize,
    /// Whether `fail_advance_after` is armed.
    pub advance_armed: AtomicBool,
    /// Iterators currently alive.
    pub open_iterators: AtomicUsize,
    /// Iterators ever opened.
    pub opened_iterators: AtomicUsize,
}

impl Faults {
    pub fn open_iterators(&self) -> usize {
        self.open_iterators.load(Ordering::SeqCst)
    }

    pub fn opened_iterators(&self) -> usize {
        self.opened_iterators.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_advance_after(&self, advances: usize) {
        self.fail_advance_after.store(advances, Ordering::SeqCst);
        self.advance_armed.store(true, Ordering::SeqCst);
    }
}

/// A Redb engine wrapper that injects failures and tracks iterator lifetimes.
pub struct FaultyEngine {
    inner: RedbEngine,
    faults: Arc<Faults>,
}

impl FaultyEngine {
    pub fn new() -> (Self, Arc<Faults>) {
        let faults = Arc::new(Faults::default());
        let engine = Self {
            inner: RedbEngine::in_memory().expect("failed to create engine"),
            faults: Arc::clone(&faults),
        };
        (engine, faults)
    }

    fn check_write(&self) -> StorageResult<()> {
        if self.faults.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Commit("injected write failure".to_string()));
        }
        Ok(())
    }
}

impl StorageEngine for FaultyEngine {
    type Iterator<'a> = TrackedIterator<RedbIterator>;

    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        if self.faults.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Internal("injected read failure".to_string()));
        }
        self.inner.get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        self.check_write()?;
        self.inner.put(key, value)
    }

    fn delete(&self, key: &[u8]) -> StorageResult<bool> {
        self.check_write()?;
        self.inner.delete(key)
    }

    fn write(&self, batch: &WriteBatch) -> StorageResult<()> {
        self.check_write()?;
        self.inner.write(batch)
    }

    fn raw_iter(&self, fetch_hint: usize) -> StorageResult<Self::Iterator<'_>> {
        let inner = self.inner.raw_iter(fetch_hint)?;
        self.faults.open_iterators.fetch_add(1, Ordering::SeqCst);
        self.faults.opened_iterators.fetch_add(1, Ordering::SeqCst);
        Ok(TrackedIterator { inner, faults: Arc::clone(&self.faults), advances: 0 })
    }
}

/// An iterator that reports its release and can fail mid-scan.
pub struct TrackedIterator<I> {
    inner: I,
    faults: Arc<Faults>,
    advances: usize,
}

impl<I: RawIterator> RawIterator for TrackedIterator<I> {
    fn seek(&mut self, key: &[u8]) -> StorageResult<()> {
        self.inner.seek(key)
    }

    fn valid(&self) -> bool {
        self.inner.valid()
    }

    fn key(&self) -> Option<&[u8]> {
        self.inner.key()
    }

    fn value(&self) -> Option<&[u8]> {
        self.inner.value()
    }

    fn next(&mut self) -> StorageResult<()> {
        if self.faults.advance_armed.load(Ordering::SeqCst)
            && self.advances >= self.faults.fail_advance_after.load(Ordering::SeqCst)
        {
            return Err(StorageError::Internal("injected iterator failure".to_string()));
        }
        self.advances += 1;
        self.inner.next()
    }
}

impl<I> Drop for TrackedIterator<I> {
    fn drop(&mut self) {
        self.faults.open_iterators.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A store over a fault-injecting engine.
pub fn faulty_store() -> (Store<FaultyEngine>, Arc<Faults>) {
    let (engine, faults) = FaultyEngine::new();
    (Store::from_engine(engine), faults)
}

/// An in-memory store holding `keys`, each key's value being its uppercase form.
pub fn store_with(keys: &[&str]) -> Store {
    let store = Store::in_memory().expect("failed to create store");
    let mut batch = store.new_batch();
    for key in keys {
        batch.put(key.as_bytes(), key.to_uppercase().as_bytes());
    }
    batch.write().expect("failed to write batch");
    store
}

/// Convert string literals to owned byte vectors.
pub fn bytes(items: &[&str]) -> Vec<Vec<u8>> {
    items.iter().map(|s| s.as_bytes().to_vec()).collect()
}
