//! Storage engine traits and abstractions.
//!
//! This module defines what a backend must provide:
//!
//! - [`StorageEngine`] - Point operations, atomic batch writes, raw iterators
//! - [`RawIterator`] - Seek + forward scan over the ordered key space
//! - [`WriteBatch`] - An ordered list of puts and deletes committed together
//!
//! # Error Handling
//!
//! All operations return [`StorageResult<T>`] which is an alias for
//! `Result<T, StorageError>`.

mod batch;
mod error;
mod traits;

pub use batch::{WriteBatch, WriteOp};
pub use error::{StorageError, StorageResult};
pub use traits::{KeyValue, RawIterator, StorageEngine};
