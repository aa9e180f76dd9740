//! Link value types.

use serde::Serialize;
use std::path::PathBuf;

/// The text surrounding a link in its source note.
///
/// `excerpt` is the trimmed text of the innermost block element (paragraph,
/// heading, list item, block quote) containing the link; `offset` is that
/// block's byte offset in the source file. Backlink listings render the
/// excerpt so the reader sees the sentence that made the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkContext {
    pub excerpt: String,
    pub offset: usize,
}

/// An outbound link extracted from one note.
///
/// The source path is implicit: a `NoteLink` only exists inside an
/// extraction result or a store row keyed by its source. `target` is the
/// resolved absolute path the link points at, which may not exist yet;
/// linking to a note before creating it is allowed.
///
/// Two links from the same source to the same target are distinct values
/// when their contexts differ, and both are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteLink {
    pub target: PathBuf,
    pub context: LinkContext,
}

impl NoteLink {
    pub fn new(target: PathBuf, excerpt: impl Into<String>, offset: usize) -> Self {
        Self {
            target,
            context: LinkContext {
                excerpt: excerpt.into(),
                offset,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_populates_context() {
        let link = NoteLink::new(PathBuf::from("/n/b.md"), "see [b](b.md)", 42);
        assert_eq!(link.target, PathBuf::from("/n/b.md"));
        assert_eq!(link.context.excerpt, "see [b](b.md)");
        assert_eq!(link.context.offset, 42);
    }

    #[test]
    fn same_pair_different_context_not_equal() {
        let first = NoteLink::new(PathBuf::from("/n/b.md"), "first mention", 10);
        let second = NoteLink::new(PathBuf::from("/n/b.md"), "second mention", 90);
        assert_ne!(first, second);
    }
}
