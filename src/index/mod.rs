//! Incremental note indexing and link-graph maintenance.

mod builder;
mod cache;
mod extract;
mod notes_index;
mod schema;
mod sqlite;
mod store;

pub mod hooks;

pub use builder::{FileOutcome, IndexBuilder, NoopReporter, ProgressReporter, ScanStats};
pub use cache::DerivedCaches;
pub use extract::{Extraction, LinkOccurrence, extract, link_occurrences, resolve_note_target};
pub use hooks::RenameOutcome;
pub use notes_index::NotesIndex;
pub use schema::{create_schema, get_schema_version};
pub use sqlite::SqliteStore;
pub use store::{
    Backlink, Completion, GraphStore, LinkRow, StagedNote, StoreError, StoreResult,
};

use crate::infra::FsError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during index operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// A query arrived before the first successful full scan.
    ///
    /// Deliberately distinct from an empty result, so callers can tell
    /// "no data" from "not indexed yet."
    #[error("index has not been built yet; run `warren index` first")]
    Unbuilt,

    /// A rename targeted a path that is already indexed.
    #[error("a note already exists at {path}")]
    RenameCollision { path: PathBuf },

    /// A store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A filesystem operation failed.
    #[error("filesystem error: {0}")]
    Fs(#[from] FsError),
}

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;
