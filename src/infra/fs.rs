//! Note file discovery and path handling.
//!
//! All paths handed to the index are absolute and symlink-resolved; a
//! note's resolved path is its identity everywhere else in the crate.

use std::io::{self, Write as IoWrite};
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Errors during file system operations on notes.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("notes directory not found: {path}")]
    NotFound { path: PathBuf },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Returns true when the path's extension marks it as a note.
///
/// Plain notes end in `.md`; the encrypted variant wraps the note
/// extension with a `.gpg` suffix (`journal.md.gpg`).
pub fn is_note_path(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some("md") => true,
        Some("gpg") => path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.ends_with(".md")),
        _ => false,
    }
}

/// Returns true for the encrypted note variant.
pub fn is_encrypted_note(path: &Path) -> bool {
    is_note_path(path) && path.extension().and_then(|e| e.to_str()) == Some("gpg")
}

/// Returns the file name with the note extension (and any encryption
/// suffix) stripped.
pub fn note_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    name.strip_suffix(".md.gpg")
        .or_else(|| name.strip_suffix(".md"))
        .unwrap_or(name)
        .to_string()
}

/// Scans a directory recursively for note files.
///
/// Hidden files and directories (leading `.`, which covers the `.index/`
/// directory holding the database) are pruned. Every returned path is
/// absolute and symlink-resolved; entries that cannot be resolved are
/// skipped rather than failing the scan. The result is sorted so repeated
/// scans of an unchanged tree enumerate identically.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the directory doesn't exist and
/// `FsError::NotADirectory` if the path is not a directory.
pub fn scan_notes_directory(dir: &Path) -> Result<Vec<PathBuf>, FsError> {
    if !dir.exists() {
        return Err(FsError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(FsError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_note_path(e.path()))
        .filter_map(|e| std::fs::canonicalize(e.path()).ok())
        .collect();
    paths.sort();
    paths.dedup();
    Ok(paths)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

/// Lexically normalizes a path: resolves `.` and `..` components without
/// touching the filesystem.
///
/// Link targets may point at notes that do not exist yet, so this cannot
/// go through `fs::canonicalize`. Leading `..` on an absolute path is
/// dropped, matching how the kernel resolves `/..`.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Computes the relative path from `base_dir` to `target`.
///
/// Both inputs must be absolute. Used when rewriting a link after its
/// target was renamed: the new destination is expressed relative to the
/// linking file's directory.
pub fn relative_path_from(base_dir: &Path, target: &Path) -> PathBuf {
    let base: Vec<Component> = base_dir.components().collect();
    let dest: Vec<Component> = target.components().collect();

    let mut shared = 0;
    while shared < base.len() && shared < dest.len() && base[shared] == dest[shared] {
        shared += 1;
    }

    let mut rel = PathBuf::new();
    for _ in shared..base.len() {
        rel.push("..");
    }
    for component in &dest[shared..] {
        rel.push(component.as_os_str());
    }
    rel
}

/// Writes text to a path atomically via a temp file in the same directory.
///
/// # Errors
///
/// Returns `FsError::Io` if the temp file cannot be created or written,
/// and `FsError::AtomicWrite` if the final rename fails.
pub fn write_text(path: &Path, content: &str) -> Result<(), FsError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(parent).map_err(|e| FsError::Io {
        path: path.into(),
        source: e,
    })?;
    temp.write_all(content.as_bytes()).map_err(|e| FsError::Io {
        path: path.into(),
        source: e,
    })?;
    temp.persist(path).map_err(|e| FsError::AtomicWrite {
        path: path.into(),
        source: e.error,
    })?;
    Ok(())
}
