//! Event hooks keeping the store consistent on save, rename, and delete.
//!
//! The host's file-lifecycle code calls these directly as part of its own
//! save/rename/delete operations; nothing here intercepts filesystem
//! primitives. Each hook's cost is proportional to the files it touches,
//! never the whole corpus.

use crate::index::builder::extract_bytes;
use crate::index::{GraphStore, IndexError, link_occurrences, resolve_note_target};
use crate::infra::{
    ContentHash, FsError, is_note_path, normalize_path, relative_path_from, slug_from_path,
    write_text,
};
use chrono::Utc;
use std::collections::BTreeSet;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Result of a rename hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOutcome {
    /// False when the new path does not qualify as a note; the old entry
    /// was dropped and the new location is not indexed.
    pub tracked: bool,
    /// Referencing files whose on-disk link text was rewritten.
    pub rewritten: Vec<PathBuf>,
}

/// Re-indexes one known-changed note.
///
/// Recomputes the note's hash, titles, ref, and outbound links, and
/// replaces its stored rows in one transaction. Equivalent to what a full
/// scan does for a changed file, without the directory walk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the store rejects the
/// replacement.
pub fn on_save<S: GraphStore>(store: &mut S, path: &Path) -> Result<(), IndexError> {
    let path = resolve_existing(path)?;
    let bytes = std::fs::read(&path).map_err(|e| FsError::Io {
        path: path.clone(),
        source: e,
    })?;
    let hash = ContentHash::compute(&bytes);
    let extraction = extract_bytes(&path, &bytes);
    store.replace_note(&path, &hash, Utc::now(), &extraction)?;
    Ok(())
}

/// Drops a deleted note from the store, cascading its titles, outbound
/// links, and ref. Returns whether a row existed.
pub fn on_delete<S: GraphStore>(store: &mut S, path: &Path) -> Result<bool, IndexError> {
    Ok(store.delete_note(&normalize_path(path))?)
}

/// Handles a note rename after the host has moved the file on disk.
///
/// In order: rewrites the on-disk link text of every note referencing the
/// old path (recomputing each relative destination, preserving custom
/// labels, and updating a label only when it was the old default title and
/// the default changed), re-runs the save hook for each rewritten
/// referrer, then replaces the old store entry with the new path. A
/// self-link moves with the file and is rewritten relative to the new
/// location.
///
/// A rename onto a path that is not a note drops the old entry and stops
/// tracking; backlinks at the old path go dangling, which is accepted.
///
/// # Errors
///
/// Returns [`IndexError::RenameCollision`] without mutating anything when
/// the new path is already indexed.
pub fn on_rename<S: GraphStore>(
    store: &mut S,
    old: &Path,
    new: &Path,
) -> Result<RenameOutcome, IndexError> {
    let old = normalize_path(old);

    if !is_note_path(new) {
        store.delete_note(&old)?;
        return Ok(RenameOutcome {
            tracked: false,
            rewritten: Vec::new(),
        });
    }

    let new = resolve_existing(new)?;
    if store.contains_note(&new)? {
        return Err(IndexError::RenameCollision { path: new });
    }

    // Default labels before/after: the canonical title if one is declared,
    // else the path-derived slug (which is what the rename changes)
    let old_label = store
        .titles_of(&old)?
        .into_iter()
        .next()
        .unwrap_or_else(|| slug_from_path(&old));
    let new_bytes = std::fs::read(&new).map_err(|e| FsError::Io {
        path: new.clone(),
        source: e,
    })?;
    let new_label = extract_bytes(&new, &new_bytes)
        .titles
        .first()
        .cloned()
        .unwrap_or_else(|| slug_from_path(&new));

    let sources: BTreeSet<PathBuf> = store
        .backlinks_to(&old)?
        .into_iter()
        .map(|b| b.source)
        .collect();

    let mut rewritten = Vec::new();
    for source in sources {
        let is_self = source == old;
        // A self-link's text moved with the file, but was authored
        // relative to the old directory
        let file_path = if is_self { new.clone() } else { source.clone() };
        let authored_dir = source.parent().unwrap_or_else(|| Path::new("/"));
        let lives_in = file_path.parent().unwrap_or_else(|| Path::new("/"));
        let new_dest = relative_path_from(lives_in, &new);

        // An unreadable referrer is skipped, not fatal; its stored links
        // go stale until its next save
        let Ok(content) = std::fs::read_to_string(&file_path) else {
            continue;
        };
        if let Some(updated) =
            rewrite_links(&content, authored_dir, &old, &new_dest, &old_label, &new_label)
        {
            write_text(&file_path, &updated)?;
            rewritten.push(file_path.clone());
            if !is_self {
                on_save(store, &file_path)?;
            }
        }
    }

    store.delete_note(&old)?;
    on_save(store, &new)?;

    Ok(RenameOutcome {
        tracked: true,
        rewritten,
    })
}

/// Rewrites every link in `content` whose destination resolves to
/// `old_target`. Returns `None` when nothing matched.
fn rewrite_links(
    content: &str,
    authored_dir: &Path,
    old_target: &Path,
    new_dest: &Path,
    old_label: &str,
    new_label: &str,
) -> Option<String> {
    let new_dest = new_dest.to_string_lossy();
    let mut edits: Vec<(Range<usize>, String)> = Vec::new();

    for occ in link_occurrences(content) {
        let Some(resolved) = resolve_note_target(authored_dir, &occ.dest) else {
            continue;
        };
        if resolved != old_target {
            continue;
        }

        let span_text = &content[occ.span.clone()];
        let relabel = occ.label == old_label && old_label != new_label;

        match dest_range_in(span_text, &occ.dest) {
            Some(dest_range) => {
                edits.push((
                    occ.span.start + dest_range.start..occ.span.start + dest_range.end,
                    new_dest.to_string(),
                ));
                if relabel && span_text.get(1..1 + occ.label.len()) == Some(occ.label.as_str()) {
                    edits.push((
                        occ.span.start + 1..occ.span.start + 1 + occ.label.len(),
                        new_label.to_string(),
                    ));
                }
            }
            // The destination isn't recoverable from the source text
            // (escaped or bracketed form); rebuild the whole link
            None => {
                let label = if relabel { new_label } else { &occ.label };
                edits.push((occ.span.clone(), format!("[{label}]({new_dest})")));
            }
        }
    }

    if edits.is_empty() {
        return None;
    }

    // Apply back-to-front so earlier spans stay valid
    edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));
    let mut updated = content.to_string();
    for (range, replacement) in edits {
        updated.replace_range(range, &replacement);
    }
    Some(updated)
}

/// Locates the destination substring within one `[label](dest)` span.
fn dest_range_in(span_text: &str, dest: &str) -> Option<Range<usize>> {
    let sep = span_text.find("](")?;
    let search_from = sep + 2;
    let rel = span_text[search_from..].find(dest)?;
    let start = search_from + rel;
    Some(start..start + dest.len())
}

fn resolve_existing(path: &Path) -> Result<PathBuf, IndexError> {
    std::fs::canonicalize(path)
        .map_err(|e| {
            IndexError::Fs(FsError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })
}
