//! `pagekv` - Paginated Key-Value Access
//!
//! `pagekv` is a thin access layer over an ordered, embedded key-value engine.
//! Keys and values are opaque bytes, ordered byte-wise.
//!
//! # Features
//!
//! - **Point operations**: `put`, `get`, `delete` with a distinct
//!   [`Error::NotFound`] for missing keys
//! - **Atomic batches**: queue puts and deletes, commit them all or none
//! - **Prefix pagination**: bounded pages over every key sharing a prefix,
//!   resumable through a continuation token that is the next key itself
//!
//! # Quick Start
//!
//! ```ignore
//! use pagekv::Store;
//!
//! // Creates the directory if needed
//! let store = Store::open("/var/lib/app/kv")?;
//!
//! let mut batch = store.new_batch();
//! batch.put(b"x1", b"a").put(b"x2", b"b").put(b"x3", b"c");
//! batch.write()?;
//!
//! let page = store.fetch_keys(b"x", None, 2)?;
//! assert_eq!(page.items, vec![b"x1".to_vec(), b"x2".to_vec()]);
//! assert_eq!(page.next_token.as_deref(), Some(b"x3".as_slice()));
//!
//! let page = store.fetch_keys(b"x", page.next_token.as_deref(), 2)?;
//! assert!(page.is_last());
//! ```
//!
//! # Modules
//!
//! - [`store`] - The store handle
//! - [`batch`] - Atomic write batches
//! - [`scan`] - Prefix-bounded pagination
//! - [`config`] - Store configuration
//! - [`error`] - Error types

pub mod batch;
pub mod config;
pub mod error;
pub mod scan;
pub mod store;

pub use batch::Batch;
pub use config::{StoreConfig, DEFAULT_SCAN_FETCH_LIMIT};
pub use error::{Error, Result};
pub use scan::{Page, Pages, ScanMode};
pub use store::Store;

pub use pagekv_storage::backends::RedbEngine;
pub use pagekv_storage::{RawIterator, StorageEngine, StorageError, WriteBatch, WriteOp};
