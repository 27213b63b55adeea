//! Store configuration.

use std::path::PathBuf;

use pagekv_storage::backends::redb::tables::DATA_FILE_NAME;
use pagekv_storage::backends::RedbConfig;

use crate::error::{Error, Result};

/// Default upper bound on entries a scan asks the engine for at a time.
pub const DEFAULT_SCAN_FETCH_LIMIT: usize = 1000;

/// Configuration options for opening a store.
///
/// ```ignore
/// use pagekv::{Store, StoreConfig};
///
/// let config = StoreConfig::new("/var/lib/app/kv")
///     .cache_size(64 * 1024 * 1024)
///     .scan_fetch_limit(256);
/// let store = Store::open_with_config(config)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding the store's files.
    pub path: PathBuf,
    /// Whether to create the directory (and its parents) if it doesn't exist.
    pub create_dirs: bool,
    /// Engine cache size in bytes. `None` keeps the engine default.
    pub cache_size: Option<usize>,
    /// Cap on the engine fetch hint used by scans.
    ///
    /// Sizing only: a scan still returns the full requested page size.
    pub scan_fetch_limit: usize,
}

impl StoreConfig {
    /// Create a new configuration for the given directory.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_dirs: true,
            cache_size: None,
            scan_fetch_limit: DEFAULT_SCAN_FETCH_LIMIT,
        }
    }

    /// Set whether to create the directory if it doesn't exist.
    #[must_use]
    pub const fn create_dirs(mut self, create: bool) -> Self {
        self.create_dirs = create;
        self
    }

    /// Set the engine cache size.
    #[must_use]
    pub const fn cache_size(mut self, size: usize) -> Self {
        self.cache_size = Some(size);
        self
    }

    /// Set the scan fetch limit.
    #[must_use]
    pub const fn scan_fetch_limit(mut self, limit: usize) -> Self {
        self.scan_fetch_limit = limit;
        self
    }

    /// Check the configuration for values the store cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `scan_fetch_limit` is zero.
    pub fn validate(&self) -> Result<()> {
        validate_fetch_limit(self.scan_fetch_limit)
    }

    /// Path of the engine's data file inside the store directory.
    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        self.path.join(DATA_FILE_NAME)
    }

    /// Backend options derived from this configuration.
    pub(crate) fn redb_config(&self) -> RedbConfig {
        match self.cache_size {
            Some(size) => RedbConfig::new().cache_size(size),
            None => RedbConfig::new(),
        }
    }
}

pub(crate) fn validate_fetch_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(Error::validation("scan fetch limit must be at least 1"));
    }
    Ok(())
}
