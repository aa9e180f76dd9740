//! GraphStore trait and row types.

use crate::domain::NoteLink;
use crate::index::Extraction;
use crate::infra::ContentHash;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ===========================================
// StoreError Type
// ===========================================

/// Errors that can occur in the graph store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted row could not be interpreted.
    ///
    /// This indicates store corruption; the recovery path is a full
    /// rebuild from an empty store.
    #[error("corrupt index row: {0}")]
    CorruptRow(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ===========================================
// Row Types
// ===========================================

/// One stored link, viewed from its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRow {
    pub source: PathBuf,
    pub target: PathBuf,
    pub excerpt: String,
    pub offset: usize,
}

/// One stored link, viewed from its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Backlink {
    pub source: PathBuf,
    pub excerpt: String,
    pub offset: usize,
}

/// One completion candidate: a display label mapped to the note it names.
///
/// A note with a title and two aliases contributes three completions, all
/// pointing at the same path. An untitled note contributes one, labeled by
/// its path-derived slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub label: String,
    pub path: PathBuf,
}

/// A fully extracted note staged for a bulk scan commit.
#[derive(Debug, Clone)]
pub struct StagedNote {
    pub path: PathBuf,
    pub hash: ContentHash,
    pub scanned_at: DateTime<Utc>,
    pub extraction: Extraction,
}

// ===========================================
// GraphStore Trait
// ===========================================

/// The durable files/titles/links/refs relation, keyed by resolved path.
///
/// Every `replace_*` operation is atomic with respect to readers: a reader
/// never observes a path's rows partially deleted and not yet reinserted.
/// Implementations back this with a transaction per call.
pub trait GraphStore {
    /// Inserts or updates a note's file row (hash and scan time).
    fn upsert_note(
        &mut self,
        path: &Path,
        hash: &ContentHash,
        scanned_at: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Replaces all title rows for a path. Order is preserved; the first
    /// title is canonical.
    fn replace_titles(&mut self, path: &Path, titles: &[String]) -> StoreResult<()>;

    /// Replaces all outbound link rows for a path.
    ///
    /// Links are never updated in place; the old set is deleted wholesale
    /// and the new set inserted in one transaction.
    fn replace_links(&mut self, path: &Path, links: &[NoteLink]) -> StoreResult<()>;

    /// Replaces the reference key for a path (`None` clears it).
    fn replace_ref(&mut self, path: &Path, ref_key: Option<&str>) -> StoreResult<()>;

    /// Replaces a note's hash, titles, links, and ref in one transaction.
    ///
    /// Equivalent to `upsert_note` + the three `replace_*` calls, but a
    /// reader sees either the old note or the new one, never a mix.
    fn replace_note(
        &mut self,
        path: &Path,
        hash: &ContentHash,
        scanned_at: DateTime<Utc>,
        extraction: &Extraction,
    ) -> StoreResult<()>;

    /// Deletes a note and cascades to its titles, outbound links, and ref.
    ///
    /// Returns whether a row existed. Backlinks *to* the path (rows owned
    /// by other sources) are untouched; they become dangling, which is a
    /// legal state for targets.
    fn delete_note(&mut self, path: &Path) -> StoreResult<bool>;

    /// Returns whether a note row exists for the path.
    fn contains_note(&self, path: &Path) -> StoreResult<bool>;

    /// Returns the stored content hash for a path, if indexed.
    fn hash_of(&self, path: &Path) -> StoreResult<Option<ContentHash>>;

    /// Returns every indexed path with its content hash.
    fn all_notes(&self) -> StoreResult<HashMap<PathBuf, ContentHash>>;

    /// Returns a path's titles, canonical first.
    fn titles_of(&self, path: &Path) -> StoreResult<Vec<String>>;

    /// Returns every path's title list, canonical first.
    fn all_titles(&self) -> StoreResult<HashMap<PathBuf, Vec<String>>>;

    /// Returns the links pointing at a path, with their contexts.
    fn backlinks_to(&self, path: &Path) -> StoreResult<Vec<Backlink>>;

    /// Returns a path's outbound links in source order.
    fn links_from(&self, path: &Path) -> StoreResult<Vec<LinkRow>>;

    /// Returns every stored link.
    fn all_links(&self) -> StoreResult<Vec<LinkRow>>;

    /// Resolves an external reference key to the note that declares it.
    fn resolve_key(&self, key: &str) -> StoreResult<Option<PathBuf>>;

    /// Returns every completion candidate: one per title/alias, plus a
    /// slug-labeled entry for each untitled note.
    fn all_title_completions(&self) -> StoreResult<Vec<Completion>>;

    /// Commits an entire scan result in one transaction: deletes the
    /// vanished paths, replaces every staged note, and stamps the scan
    /// completion time. A failure rolls back wholesale, leaving the
    /// pre-scan state.
    fn apply_scan(
        &mut self,
        staged: &[StagedNote],
        deletions: &[PathBuf],
        completed_at: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Returns when the last successful full scan completed, or `None` if
    /// the index has never been built.
    fn last_built_at(&self) -> StoreResult<Option<DateTime<Utc>>>;
}
