//! The store handle.
//!
//! [`Store`] owns one open storage engine and exposes point reads and writes,
//! atomic batches and paginated prefix scans over it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pagekv_storage::backends::RedbEngine;
use pagekv_storage::StorageEngine;
use tracing::{debug, info};

use crate::batch::Batch;
use crate::config::{validate_fetch_limit, StoreConfig, DEFAULT_SCAN_FETCH_LIMIT};
use crate::error::{Error, Result};
use crate::scan::{scan_page, Page, Pages, ScanMode};

/// A handle to an open key-value store.
///
/// Keys and values are opaque bytes; keys are ordered byte-wise.
///
/// # Thread Safety
///
/// `Store` adds no locking. It can be shared across threads when the engine
/// allows it: the Redb engine runs readers concurrently and serializes writers.
///
/// # Examples
///
/// ```ignore
/// use pagekv::Store;
///
/// let store = Store::open("/var/lib/app/kv")?;
/// store.put(b"user:1", b"Alice")?;
///
/// match store.get(b"user:2") {
///     Ok(value) => println!("{value:?}"),
///     Err(err) if err.is_not_found() => println!("no such user"),
///     Err(err) => return Err(err),
/// }
///
/// let page = store.fetch_keys(b"user:", None, 100)?;
/// if let Some(token) = page.next_token {
///     let next = store.fetch_keys(b"user:", Some(&token), 100)?;
/// }
///
/// store.close()?;
/// ```
pub struct Store<E: StorageEngine = RedbEngine> {
    engine: E,
    scan_fetch_limit: usize,
}

impl Store<RedbEngine> {
    /// Open or create a store in the directory `path` with default options.
    ///
    /// # Errors
    ///
    /// See [`Store::open_with_config`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_config(StoreConfig::new(path))
    }

    /// Open or create a store with custom options.
    ///
    /// The directory is created first (with its parents) when missing and
    /// `create_dirs` is set, then the engine is opened or created inside it.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the configuration is invalid
    /// - [`Error::Io`] if the directory cannot be created or is missing
    /// - [`Error::Open`] if the engine cannot be opened
    pub fn open_with_config(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        prepare_dir(&config.path, config.create_dirs)?;

        let engine = RedbEngine::open_with_config(config.data_file(), config.redb_config())
            .map_err(|source| Error::Open { path: config.path.clone(), source })?;

        info!(path = %config.path.display(), "opened store");
        Ok(Self { engine, scan_fetch_limit: config.scan_fetch_limit })
    }

    /// Create a store backed by an in-memory engine.
    ///
    /// Everything is lost when the store is closed or dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Open`] if the engine cannot be created.
    pub fn in_memory() -> Result<Self> {
        let engine = RedbEngine::in_memory()
            .map_err(|source| Error::Open { path: PathBuf::from(":memory:"), source })?;
        Ok(Self::from_engine(engine))
    }
}

impl<E: StorageEngine> Store<E> {
    /// Wrap an already open engine.
    pub fn from_engine(engine: E) -> Self {
        Self { engine, scan_fetch_limit: DEFAULT_SCAN_FETCH_LIMIT }
    }

    /// Set the cap on the engine fetch hint used by scans.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `limit` is zero.
    pub fn with_scan_fetch_limit(mut self, limit: usize) -> Result<Self> {
        validate_fetch_limit(limit)?;
        self.scan_fetch_limit = limit;
        Ok(self)
    }

    /// The cap on the engine fetch hint used by scans.
    #[must_use]
    pub const fn scan_fetch_limit(&self) -> usize {
        self.scan_fetch_limit
    }

    /// Get the underlying engine.
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Insert or overwrite a key-value pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the engine write fails.
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.engine.put(key, value)?;
        Ok(())
    }

    /// Delete a key. Deleting an absent key succeeds and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the engine write fails.
    pub fn delete(&self, key: &[u8]) -> Result<()> {
        let removed = self.engine.delete(key)?;
        if !removed {
            debug!("delete of absent key");
        }
        Ok(())
    }

    /// Get the value stored under `key`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the key does not exist
    /// - [`Error::Storage`] if the engine read fails
    pub fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        self.engine.get(key)?.ok_or(Error::NotFound)
    }

    /// Start an empty batch against this store.
    pub fn new_batch(&self) -> Batch<'_, E> {
        Batch::new(&self.engine)
    }

    /// Fetch one page of keys or values under `prefix`.
    ///
    /// Pass `None` as `token` for the first page, then each page's
    /// `next_token` to get the following one. A page without a token is the
    /// last one.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if `page_size` is zero or `token` does not
    ///   start with `prefix`
    /// - [`Error::Storage`] if the engine fails during the scan
    pub fn fetch(
        &self,
        prefix: &[u8],
        token: Option<&[u8]>,
        page_size: usize,
        mode: ScanMode,
    ) -> Result<Page<Vec<u8>>> {
        scan_page(&self.engine, self.scan_fetch_limit, prefix, token, page_size, |k, v| {
            mode.project(k, v)
        })
    }

    /// Fetch one page of keys under `prefix`.
    ///
    /// # Errors
    ///
    /// See [`Store::fetch`].
    pub fn fetch_keys(
        &self,
        prefix: &[u8],
        token: Option<&[u8]>,
        page_size: usize,
    ) -> Result<Page<Vec<u8>>> {
        self.fetch(prefix, token, page_size, ScanMode::Keys)
    }

    /// Fetch one page of values stored under keys starting with `prefix`.
    ///
    /// # Errors
    ///
    /// See [`Store::fetch`].
    pub fn fetch_values(
        &self,
        prefix: &[u8],
        token: Option<&[u8]>,
        page_size: usize,
    ) -> Result<Page<Vec<u8>>> {
        self.fetch(prefix, token, page_size, ScanMode::Values)
    }

    /// Fetch one page of `(key, value)` pairs under `prefix`.
    ///
    /// # Errors
    ///
    /// See [`Store::fetch`].
    pub fn fetch_entries(
        &self,
        prefix: &[u8],
        token: Option<&[u8]>,
        page_size: usize,
    ) -> Result<Page<(Vec<u8>, Vec<u8>)>> {
        scan_page(&self.engine, self.scan_fetch_limit, prefix, token, page_size, |k, v| {
            (k.to_vec(), v.to_vec())
        })
    }

    /// Walk every page under `prefix`, feeding each token into the next call.
    ///
    /// An empty range yields a single empty page.
    pub fn pages(&self, prefix: &[u8], page_size: usize, mode: ScanMode) -> Pages<'_, E> {
        Pages::new(self, prefix, page_size, mode)
    }

    /// Flush buffered data to durable storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the flush fails.
    pub fn flush(&self) -> Result<()> {
        self.engine.flush()?;
        Ok(())
    }

    /// Close the store, releasing the engine.
    ///
    /// The handle is consumed, so it cannot be used afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the final flush fails. The engine is
    /// released regardless.
    pub fn close(self) -> Result<()> {
        let flushed = self.engine.flush();
        drop(self.engine);
        info!("closed store");
        flushed.map_err(Error::from)
    }
}

impl<E: StorageEngine> std::fmt::Debug for Store<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("scan_fetch_limit", &self.scan_fetch_limit)
            .finish_non_exhaustive()
    }
}

/// Make sure `path` is a directory, creating it when allowed.
fn prepare_dir(path: &Path, create: bool) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if !create {
        let source = io::Error::new(io::ErrorKind::NotFound, "store directory does not exist");
        return Err(Error::Io { path: path.to_path_buf(), source });
    }

    fs::create_dir_all(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    debug!(path = %path.display(), "created store directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_dir_creates_parents() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let nested = dir.path().join("a").join("b").join("c");

        prepare_dir(&nested, true).expect("failed to prepare dir");
        assert!(nested.is_dir());

        // Existing directory is fine
        prepare_dir(&nested, false).expect("existing dir should be accepted");
    }

    #[test]
    fn test_prepare_dir_on_file_fails() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let file = dir.path().join("plain");
        fs::write(&file, b"not a dir").expect("failed to write file");

        let err = prepare_dir(&file, true).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_fetch_limit_validation() {
        let store = Store::in_memory().expect("failed to create store");
        assert_eq!(store.scan_fetch_limit(), DEFAULT_SCAN_FETCH_LIMIT);

        let store = store.with_scan_fetch_limit(7).expect("valid limit");
        assert_eq!(store.scan_fetch_limit(), 7);

        assert!(store.with_scan_fetch_limit(0).unwrap_err().is_validation());
    }
}
