//! Read-optimized in-memory projections of the graph store.

use crate::index::{GraphStore, StoreResult};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Forward-link, backward-link, and title lookup maps.
///
/// Rebuilt wholesale after each full scan; single-file hooks do not patch
/// them, so between a save and the next scan they may lag the store. The
/// store itself is always current: these maps exist to make completion
/// and backlink rendering O(1), not to be a second source of truth.
#[derive(Debug, Default)]
pub struct DerivedCaches {
    forward: HashMap<PathBuf, Vec<PathBuf>>,
    backward: HashMap<PathBuf, BTreeSet<PathBuf>>,
    titles: HashMap<PathBuf, Vec<String>>,
}

impl DerivedCaches {
    /// Builds all three maps from the store's current state.
    pub fn rebuild<S: GraphStore>(store: &S) -> StoreResult<Self> {
        let mut forward: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
        let mut backward: HashMap<PathBuf, BTreeSet<PathBuf>> = HashMap::new();

        // all_links is ordered by (source, offset); forward lists keep
        // that order, deduplicating repeated targets
        for link in store.all_links()? {
            let targets = forward.entry(link.source.clone()).or_default();
            if !targets.contains(&link.target) {
                targets.push(link.target.clone());
            }
            backward.entry(link.target).or_default().insert(link.source);
        }

        Ok(Self {
            forward,
            backward,
            titles: store.all_titles()?,
        })
    }

    /// Distinct targets a note links to, in document order.
    pub fn links_from(&self, path: &Path) -> &[PathBuf] {
        self.forward.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Set of notes linking to a path.
    pub fn links_to(&self, path: &Path) -> Option<&BTreeSet<PathBuf>> {
        self.backward.get(path)
    }

    /// A note's titles, canonical first. Empty for untitled notes.
    pub fn titles_of(&self, path: &Path) -> &[String] {
        self.titles.get(path).map(Vec::as_slice).unwrap_or(&[])
    }
}
