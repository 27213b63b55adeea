//! Redb table definitions and file layout.
//!
//! All entries live in one physical table whose keys are the caller's raw keys,
//! so the table's byte-wise key order is the store's key order.

use redb::TableDefinition;

/// The physical table that stores all key-value pairs.
pub const DATA_TABLE: TableDefinition<'static, &[u8], &[u8]> = TableDefinition::new("pagekv_data");

/// File name of the database inside a store directory.
pub const DATA_FILE_NAME: &str = "data.redb";
