//! Full incremental scan over the notes directory.

use crate::index::{Extraction, GraphStore, IndexError, StagedNote, extract};
use crate::infra::{ContentHash, is_encrypted_note, scan_notes_directory};
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};

// ===========================================
// ScanStats Type
// ===========================================

/// Counts from one full scan.
///
/// A rescan with no intervening file changes yields all zeros.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Notes whose content hash changed (or were new) and were re-extracted.
    pub files_updated: usize,
    /// Link rows inserted across all updated notes.
    pub links_inserted: usize,
    /// Title rows inserted across all updated notes.
    pub titles_updated: usize,
    /// Reference keys inserted across all updated notes.
    pub refs_updated: usize,
    /// Notes removed because their file vanished from disk.
    pub notes_deleted: usize,
}

impl ScanStats {
    /// Returns true when the scan changed nothing.
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

// ===========================================
// Progress Reporting
// ===========================================

/// Outcome of processing a single file during a scan.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    /// File was new or changed and was re-extracted.
    Updated,
    /// File's hash matched the store; extraction skipped.
    Skipped,
    /// File could not be read and was left out of this scan.
    Unreadable(String),
}

/// Trait for receiving progress updates during a scan.
pub trait ProgressReporter {
    /// Called when a file is processed.
    fn on_file(&mut self, path: &Path, outcome: FileOutcome);
    /// Called when the scan is complete.
    fn on_complete(&mut self, stats: &ScanStats);
}

/// A no-op progress reporter.
#[derive(Default)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_file(&mut self, _path: &Path, _outcome: FileOutcome) {}
    fn on_complete(&mut self, _stats: &ScanStats) {}
}

// ===========================================
// IndexBuilder
// ===========================================

/// Orchestrates the discover-hash-diff-reindex pass over a notes directory.
///
/// Only files whose content hash differs from the stored one are
/// re-extracted; unchanged files cost one read and one hash. Files that
/// disappeared from disk since the last scan are deleted from the store.
/// The whole result commits as a single transaction, so an interrupted
/// scan leaves the store in its pre-scan state and rerunning is always
/// safe.
pub struct IndexBuilder {
    notes_dir: PathBuf,
}

impl IndexBuilder {
    /// Creates a new IndexBuilder for the given notes directory.
    pub fn new(notes_dir: PathBuf) -> Self {
        Self { notes_dir }
    }

    /// Returns the notes directory.
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Runs a full incremental scan against the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the notes directory cannot be scanned or a
    /// store operation fails. Individual unreadable files are skipped,
    /// never fatal.
    pub fn full_scan<S: GraphStore>(&self, store: &mut S) -> Result<ScanStats, IndexError> {
        self.full_scan_with_progress(store, &mut NoopReporter)
    }

    /// Runs a full incremental scan with progress reporting.
    pub fn full_scan_with_progress<S: GraphStore, P: ProgressReporter>(
        &self,
        store: &mut S,
        progress: &mut P,
    ) -> Result<ScanStats, IndexError> {
        // Everything still in `known` after the walk has vanished from disk
        let mut known = store.all_notes()?;
        let discovered = scan_notes_directory(&self.notes_dir)?;
        let scanned_at = Utc::now();

        let mut staged: Vec<StagedNote> = Vec::new();
        for path in discovered {
            let bytes = match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    progress.on_file(&path, FileOutcome::Unreadable(e.to_string()));
                    // The file still exists on disk, so keep any stored
                    // rows rather than treating it as vanished
                    known.remove(&path);
                    continue;
                }
            };
            let hash = ContentHash::compute(&bytes);

            if known.remove(&path).as_ref() == Some(&hash) {
                progress.on_file(&path, FileOutcome::Skipped);
                continue;
            }

            let extraction = extract_bytes(&path, &bytes);
            progress.on_file(&path, FileOutcome::Updated);
            staged.push(StagedNote {
                path,
                hash,
                scanned_at,
                extraction,
            });
        }

        let deletions: Vec<PathBuf> = known.into_keys().collect();
        let stats = ScanStats {
            files_updated: staged.len(),
            links_inserted: staged.iter().map(|n| n.extraction.links.len()).sum(),
            titles_updated: staged.iter().map(|n| n.extraction.titles.len()).sum(),
            refs_updated: staged
                .iter()
                .filter(|n| n.extraction.ref_key.is_some())
                .count(),
            notes_deleted: deletions.len(),
        };

        store.apply_scan(&staged, &deletions, Utc::now())?;
        progress.on_complete(&stats);
        Ok(stats)
    }
}

/// Extracts a note's content, degrading to empty for bodies the extractor
/// cannot read (encrypted variants, non-UTF-8 bytes). The note is still
/// tracked by path and hash.
pub(crate) fn extract_bytes(path: &Path, bytes: &[u8]) -> Extraction {
    if is_encrypted_note(path) {
        return Extraction::default();
    }
    match std::str::from_utf8(bytes) {
        Ok(content) => extract(path, content),
        Err(_) => Extraction::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SqliteStore;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    // ===========================================
    // Test Helpers
    // ===========================================

    fn write_note(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path.parent()
            .unwrap()
            .canonicalize()
            .unwrap()
            .join(path.file_name().unwrap())
    }

    fn scan(dir: &TempDir, store: &mut SqliteStore) -> ScanStats {
        IndexBuilder::new(dir.path().to_path_buf())
            .full_scan(store)
            .unwrap()
    }

    // ===========================================
    // First scan
    // ===========================================

    #[test]
    fn empty_directory_scans_to_zero_stats() {
        let dir = TempDir::new().unwrap();
        let mut store = SqliteStore::open_in_memory().unwrap();
        let stats = scan(&dir, &mut store);
        assert!(stats.is_noop());
    }

    #[test]
    fn first_scan_indexes_everything() {
        let dir = TempDir::new().unwrap();
        write_note(dir.path(), "a.md", "---\ntitle: A\n---\n[b](b.md)\n");
        write_note(dir.path(), "b.md", "---\ntitle: B\nref: key-b\n---\nbody\n");

        let mut store = SqliteStore::open_in_memory().unwrap();
        let stats = scan(&dir, &mut store);

        assert_eq!(stats.files_updated, 2);
        assert_eq!(stats.links_inserted, 1);
        assert_eq!(stats.titles_updated, 2);
        assert_eq!(stats.refs_updated, 1);
        assert_eq!(stats.notes_deleted, 0);
    }

    #[test]
    fn scan_records_backlinks() {
        let dir = TempDir::new().unwrap();
        write_note(dir.path(), "a.md", "see [b](b.md)\n");
        let b = write_note(dir.path(), "b.md", "target\n");

        let mut store = SqliteStore::open_in_memory().unwrap();
        scan(&dir, &mut store);

        let backlinks = store.backlinks_to(&b).unwrap();
        assert_eq!(backlinks.len(), 1);
        assert!(backlinks[0].source.ends_with("a.md"));
        assert_eq!(backlinks[0].excerpt, "see [b](b.md)");
    }

    // ===========================================
    // Idempotence and hash gating
    // ===========================================

    #[test]
    fn second_scan_with_no_changes_is_noop() {
        let dir = TempDir::new().unwrap();
        write_note(dir.path(), "a.md", "---\ntitle: A\n---\n[b](b.md)\n");

        let mut store = SqliteStore::open_in_memory().unwrap();
        scan(&dir, &mut store);
        let second = scan(&dir, &mut store);

        assert!(second.is_noop(), "unchanged corpus must rescan to zeros");
    }

    #[test]
    fn rewriting_identical_bytes_does_not_reextract() {
        let dir = TempDir::new().unwrap();
        let content = "---\ntitle: A\n---\nbody\n";
        let path = write_note(dir.path(), "a.md", content);

        let mut store = SqliteStore::open_in_memory().unwrap();
        scan(&dir, &mut store);

        // Fresh mtime, same bytes: the hash comparison gates the work
        fs::write(&path, content).unwrap();
        let stats = scan(&dir, &mut store);
        assert_eq!(stats.files_updated, 0);
    }

    #[test]
    fn changed_content_is_reextracted() {
        let dir = TempDir::new().unwrap();
        let path = write_note(dir.path(), "a.md", "---\ntitle: Old\n---\n");

        let mut store = SqliteStore::open_in_memory().unwrap();
        scan(&dir, &mut store);

        fs::write(&path, "---\ntitle: New\n---\n").unwrap();
        let stats = scan(&dir, &mut store);

        assert_eq!(stats.files_updated, 1);
        assert_eq!(store.titles_of(&path).unwrap(), vec!["New"]);
    }

    // ===========================================
    // Deletion detection
    // ===========================================

    #[test]
    fn vanished_file_is_deleted_with_cascade() {
        let dir = TempDir::new().unwrap();
        let a = write_note(dir.path(), "a.md", "---\ntitle: A\nref: key-a\n---\n[b](b.md)\n");
        let b = write_note(dir.path(), "b.md", "b\n");

        let mut store = SqliteStore::open_in_memory().unwrap();
        scan(&dir, &mut store);

        fs::remove_file(&a).unwrap();
        let stats = scan(&dir, &mut store);

        assert_eq!(stats.notes_deleted, 1);
        assert!(!store.contains_note(&a).unwrap());
        assert!(store.titles_of(&a).unwrap().is_empty());
        assert!(store.backlinks_to(&b).unwrap().is_empty());
        assert_eq!(store.resolve_key("key-a").unwrap(), None);
    }

    // ===========================================
    // Degraded files
    // ===========================================

    #[test]
    fn encrypted_note_tracked_without_extraction() {
        let dir = TempDir::new().unwrap();
        let sealed = write_note(dir.path(), "sealed.md.gpg", "\u{1}binary\u{2}");

        let mut store = SqliteStore::open_in_memory().unwrap();
        let stats = scan(&dir, &mut store);

        assert_eq!(stats.files_updated, 1);
        assert!(store.contains_note(&sealed).unwrap());
        assert!(store.titles_of(&sealed).unwrap().is_empty());
        assert!(store.links_from(&sealed).unwrap().is_empty());
    }

    #[test]
    fn non_utf8_note_tracked_without_extraction() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.md");
        fs::write(&path, [0xFF, 0xFE, b'x']).unwrap();

        let mut store = SqliteStore::open_in_memory().unwrap();
        let stats = scan(&dir, &mut store);

        assert_eq!(stats.files_updated, 1);
    }

    // ===========================================
    // Progress reporting
    // ===========================================

    struct RecordingReporter {
        outcomes: Vec<(PathBuf, FileOutcome)>,
        completed: Option<ScanStats>,
    }

    impl ProgressReporter for RecordingReporter {
        fn on_file(&mut self, path: &Path, outcome: FileOutcome) {
            self.outcomes.push((path.to_path_buf(), outcome));
        }
        fn on_complete(&mut self, stats: &ScanStats) {
            self.completed = Some(stats.clone());
        }
    }

    #[test]
    fn progress_reports_updates_then_skips() {
        let dir = TempDir::new().unwrap();
        write_note(dir.path(), "a.md", "body\n");

        let mut store = SqliteStore::open_in_memory().unwrap();
        let builder = IndexBuilder::new(dir.path().to_path_buf());
        let mut reporter = RecordingReporter {
            outcomes: Vec::new(),
            completed: None,
        };

        builder
            .full_scan_with_progress(&mut store, &mut reporter)
            .unwrap();
        assert!(matches!(reporter.outcomes[0].1, FileOutcome::Updated));

        reporter.outcomes.clear();
        builder
            .full_scan_with_progress(&mut store, &mut reporter)
            .unwrap();
        assert!(matches!(reporter.outcomes[0].1, FileOutcome::Skipped));
        assert!(reporter.completed.as_ref().unwrap().is_noop());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let result = IndexBuilder::new(PathBuf::from("/definitely/not/here")).full_scan(&mut store);
        assert!(result.is_err());
    }
}
