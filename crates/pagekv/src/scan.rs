//! Prefix-bounded, page-limited forward scans.
//!
//! A scan seeks a fresh engine iterator to the continuation token (or to the
//! prefix on the first call) and collects matching entries until the page is
//! full or the prefix range ends. When the page fills up and another matching
//! key exists, that key becomes the next continuation token, so pages chain
//! with no gaps or duplicates.
//!
//! # Consistency
//!
//! Each page is read from a single engine snapshot, but nothing is held between
//! pages. Writes landing in the range between two calls may or may not be seen
//! by later pages.

use pagekv_storage::{RawIterator, StorageEngine};
use tracing::trace;

use crate::error::{Error, Result};
use crate::store::Store;

/// What a scan returns for each matching entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Return the matching keys.
    Keys,
    /// Return the values stored under the matching keys.
    Values,
}

impl ScanMode {
    pub(crate) fn project(self, key: &[u8], value: &[u8]) -> Vec<u8> {
        match self {
            Self::Keys => key.to_vec(),
            Self::Values => value.to_vec(),
        }
    }
}

/// One page of a prefix scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in ascending key order, at most the requested page size.
    pub items: Vec<T>,
    /// The first key not returned yet, to pass as the next call's token.
    ///
    /// `None` means the prefix range is exhausted.
    pub next_token: Option<Vec<u8>>,
}

impl<T> Page<T> {
    /// Returns `true` if no further page exists.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.next_token.is_none()
    }

    /// Number of items in the page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Scan one page of keys starting with `prefix`.
///
/// `project` turns each matching `(key, value)` into a page item.
pub(crate) fn scan_page<E, T>(
    engine: &E,
    fetch_limit: usize,
    prefix: &[u8],
    token: Option<&[u8]>,
    page_size: usize,
    mut project: impl FnMut(&[u8], &[u8]) -> T,
) -> Result<Page<T>>
where
    E: StorageEngine,
{
    if page_size == 0 {
        return Err(Error::validation("page size must be at least 1"));
    }
    if let Some(token) = token {
        if !token.starts_with(prefix) {
            return Err(Error::validation("continuation token does not match the scan prefix"));
        }
    }

    // One extra entry tells a full page apart from the last one.
    let fetch_hint = page_size.saturating_add(1).min(fetch_limit);
    let mut items = Vec::with_capacity(page_size.min(fetch_limit));

    // The iterator is dropped on every return path below, including `?`,
    // which releases its engine snapshot.
    let mut iter = engine.raw_iter(fetch_hint)?;
    iter.seek(token.unwrap_or(prefix))?;

    while let (Some(key), Some(value)) = (iter.key(), iter.value()) {
        if !key.starts_with(prefix) {
            break;
        }
        if items.len() == page_size {
            let next_token = key.to_vec();
            trace!(page_size, items = items.len(), "page full");
            return Ok(Page { items, next_token: Some(next_token) });
        }
        items.push(project(key, value));
        iter.next()?;
    }

    trace!(page_size, items = items.len(), "prefix range exhausted");
    Ok(Page { items, next_token: None })
}

/// Where a [`Pages`] walk resumes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Resume {
    Start,
    At(Vec<u8>),
    Done,
}

/// An iterator over every page of a prefix scan.
///
/// Created by [`Store::pages`]. Each page's token is fed into the next call.
/// The walk ends after the page without a token, or after the first error.
pub struct Pages<'a, E: StorageEngine> {
    store: &'a Store<E>,
    prefix: Vec<u8>,
    page_size: usize,
    mode: ScanMode,
    resume: Resume,
}

impl<'a, E: StorageEngine> Pages<'a, E> {
    pub(crate) fn new(
        store: &'a Store<E>,
        prefix: &[u8],
        page_size: usize,
        mode: ScanMode,
    ) -> Self {
        Self { store, prefix: prefix.to_vec(), page_size, mode, resume: Resume::Start }
    }
}

impl<E: StorageEngine> Iterator for Pages<'_, E> {
    type Item = Result<Page<Vec<u8>>>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = match &self.resume {
            Resume::Start => None,
            Resume::At(token) => Some(token.as_slice()),
            Resume::Done => return None,
        };

        let result = self.store.fetch(&self.prefix, token, self.page_size, self.mode);
        self.resume = match &result {
            Ok(Page { next_token: Some(token), .. }) => Resume::At(token.clone()),
            _ => Resume::Done,
        };
        Some(result)
    }
}

impl<E: StorageEngine> std::iter::FusedIterator for Pages<'_, E> {}
