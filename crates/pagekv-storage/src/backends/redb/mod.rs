//! Redb storage backend.
//!
//! This module provides a storage backend implementation using Redb,
//! a pure-Rust embedded database with ACID transactions.
//!
//! # Example
//!
//! ```ignore
//! use pagekv_storage::backends::RedbEngine;
//! use pagekv_storage::{RawIterator, StorageEngine, WriteBatch};
//!
//! // Open a database (creates if it doesn't exist)
//! let engine = RedbEngine::open("data.redb")?;
//!
//! // Write atomically
//! let mut batch = WriteBatch::new();
//! batch.put(b"user:1", b"Alice");
//! batch.put(b"user:2", b"Bob");
//! engine.write(&batch)?;
//!
//! // Scan from a key
//! let mut iter = engine.raw_iter(100)?;
//! iter.seek(b"user:")?;
//! assert_eq!(iter.key(), Some(b"user:1".as_slice()));
//! ```
//!
//! # In-Memory Databases
//!
//! For testing, you can create an in-memory database that doesn't persist:
//!
//! ```ignore
//! let engine = RedbEngine::in_memory()?;
//! ```

mod engine;
mod iterator;
pub mod tables;

pub use engine::{RedbConfig, RedbEngine};
pub use iterator::{RedbIterator, MAX_FETCH_SIZE};
