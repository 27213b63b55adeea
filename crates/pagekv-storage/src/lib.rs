//! `pagekv` Storage
//!
//! This crate provides the ordered key-value engine abstraction and the backend
//! implementations that `pagekv` builds on.
//!
//! # Core Traits
//!
//! - [`StorageEngine`] - Point get/put/delete, atomic batch writes, raw iterators
//! - [`RawIterator`] - Seek to a key, then step forward in byte-wise key order
//!
//! # Error Handling
//!
//! All storage operations return [`StorageResult<T>`], an alias for
//! `Result<T, StorageError>`. A missing key is not an error at this level:
//! [`StorageEngine::get`] returns `Ok(None)`.
//!
//! # Example
//!
//! ```ignore
//! use pagekv_storage::StorageEngine;
//! use pagekv_storage::backends::RedbEngine;
//!
//! let engine = RedbEngine::open("data.redb")?;
//! engine.put(b"user:1", b"Alice")?;
//! assert_eq!(engine.get(b"user:1")?, Some(b"Alice".to_vec()));
//! ```
//!
//! # Modules
//!
//! - [`engine`] - Storage engine traits and abstractions
//! - [`backends`] - Concrete storage backend implementations

pub mod backends;
pub mod engine;

pub use engine::{
    KeyValue, RawIterator, StorageEngine, StorageError, StorageResult, WriteBatch, WriteOp,
};
