//! SQLite-backed GraphStore implementation.

mod connection;
mod store_impl;
mod transaction;


pub use transaction::Transaction;

use rusqlite::Connection;

/// SQLite implementation of [`crate::index::GraphStore`].
///
/// One connection, single writer. Every mutation runs inside an RAII
/// transaction so readers on the same store observe pre- or post-state
/// only.
pub struct SqliteStore {
    conn: Connection,
}
