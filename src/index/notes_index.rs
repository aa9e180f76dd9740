//! The index facade handed to collaborators.

use crate::index::{
    Backlink, Completion, DerivedCaches, GraphStore, IndexBuilder, IndexError, IndexResult,
    LinkRow, NoopReporter, ProgressReporter, RenameOutcome, ScanStats, SqliteStore, hooks,
};
use crate::infra::slug_from_path;
use std::path::{Path, PathBuf};

/// Subdirectory of the notes root holding the persistent store.
const INDEX_DIR: &str = ".index";
/// Database file name inside [`INDEX_DIR`].
const DB_FILE: &str = "graph.db";

/// One notes corpus and its index, owned by the host application.
///
/// Constructed per root directory and passed by reference to every
/// collaborator; there is no ambient singleton. Queries before the first
/// successful [`build`](Self::build) fail with [`IndexError::Unbuilt`].
/// The built state is persisted, so a store built by an earlier process
/// is immediately queryable.
///
/// The derived caches are rebuilt only by `build`; the single-file hooks
/// update the store but leave an existing cache object stale until the
/// next build. Queries on this facade read the store directly and are
/// always current.
pub struct NotesIndex<S: GraphStore> {
    root: PathBuf,
    store: S,
    caches: Option<DerivedCaches>,
}

impl NotesIndex<SqliteStore> {
    /// Opens (or creates) the persistent index for a notes directory.
    pub fn open(root: &Path) -> IndexResult<Self> {
        let store = SqliteStore::open(&Self::db_path(root))?;
        Ok(Self::with_store(root.to_path_buf(), store))
    }

    /// Returns the database path for a notes directory.
    pub fn db_path(root: &Path) -> PathBuf {
        root.join(INDEX_DIR).join(DB_FILE)
    }
}

impl<S: GraphStore> NotesIndex<S> {
    /// Wraps an existing store. Useful for tests with in-memory stores.
    pub fn with_store(root: PathBuf, store: S) -> Self {
        Self {
            root,
            store,
            caches: None,
        }
    }

    /// Returns the notes root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ===========================================
    // Building
    // ===========================================

    /// Runs a full incremental scan and rebuilds the derived caches.
    pub fn build(&mut self) -> IndexResult<ScanStats> {
        self.build_with_progress(&mut NoopReporter)
    }

    /// Runs a full incremental scan with progress reporting.
    ///
    /// The caches rebuild is the completion handoff: once this returns,
    /// queries see the post-scan state.
    pub fn build_with_progress<P: ProgressReporter>(
        &mut self,
        progress: &mut P,
    ) -> IndexResult<ScanStats> {
        let builder = IndexBuilder::new(self.root.clone());
        let stats = builder.full_scan_with_progress(&mut self.store, progress)?;
        self.caches = Some(DerivedCaches::rebuild(&self.store)?);
        Ok(stats)
    }

    /// The derived lookup maps from the most recent build in this
    /// process, if any.
    pub fn caches(&self) -> Option<&DerivedCaches> {
        self.caches.as_ref()
    }

    // ===========================================
    // Lifecycle hooks
    // ===========================================

    /// Save hook: re-indexes one changed note.
    pub fn on_save(&mut self, path: &Path) -> IndexResult<()> {
        hooks::on_save(&mut self.store, path)
    }

    /// Rename hook: rewrites referrers and moves the note's entry.
    pub fn on_rename(&mut self, old: &Path, new: &Path) -> IndexResult<RenameOutcome> {
        hooks::on_rename(&mut self.store, old, new)
    }

    /// Delete hook: drops the note's entry, cascading its rows.
    pub fn on_delete(&mut self, path: &Path) -> IndexResult<bool> {
        hooks::on_delete(&mut self.store, path)
    }

    // ===========================================
    // Queries
    // ===========================================

    /// Every title/alias completion candidate, label → path.
    pub fn completions(&self) -> IndexResult<Vec<Completion>> {
        self.ensure_ready()?;
        Ok(self.store.all_title_completions()?)
    }

    /// Notes linking to a path, with their context excerpts.
    pub fn backlinks(&self, path: &Path) -> IndexResult<Vec<Backlink>> {
        self.ensure_ready()?;
        Ok(self.store.backlinks_to(path)?)
    }

    /// A note's outbound links in document order.
    pub fn links_from(&self, path: &Path) -> IndexResult<Vec<LinkRow>> {
        self.ensure_ready()?;
        Ok(self.store.links_from(path)?)
    }

    /// A note's canonical title, or its path-derived slug when untitled.
    pub fn title_or_slug(&self, path: &Path) -> IndexResult<String> {
        self.ensure_ready()?;
        Ok(self
            .store
            .titles_of(path)?
            .into_iter()
            .next()
            .unwrap_or_else(|| slug_from_path(path)))
    }

    /// Resolves an external reference key to its note.
    pub fn resolve_ref(&self, key: &str) -> IndexResult<Option<PathBuf>> {
        self.ensure_ready()?;
        Ok(self.store.resolve_key(key)?)
    }

    /// Whether a path is currently indexed.
    pub fn is_indexed(&self, path: &Path) -> IndexResult<bool> {
        self.ensure_ready()?;
        Ok(self.store.contains_note(path)?)
    }

    /// Stored links whose target is not an indexed note.
    ///
    /// Links may legally point at not-yet-created notes; this surfaces
    /// them for the `check` report.
    pub fn dangling_links(&self) -> IndexResult<Vec<LinkRow>> {
        self.ensure_ready()?;
        let notes = self.store.all_notes()?;
        Ok(self
            .store
            .all_links()?
            .into_iter()
            .filter(|link| !notes.contains_key(&link.target))
            .collect())
    }

    /// Fails with [`IndexError::Unbuilt`] until a full scan has completed
    /// against this store (in any process).
    pub fn ensure_ready(&self) -> IndexResult<()> {
        if self.store.last_built_at()?.is_none() {
            return Err(IndexError::Unbuilt);
        }
        Ok(())
    }
}
