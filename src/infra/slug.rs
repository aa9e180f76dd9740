//! Slug generation for notes without a title property.

use crate::infra::note_stem;
use std::path::Path;

/// Converts arbitrary text to a lowercase hyphenated slug.
///
/// - Lowercases the input
/// - Maps runs of non-alphanumeric characters to single hyphens
/// - Trims leading/trailing hyphens
/// - Returns "untitled" when nothing survives
///
/// # Examples
///
/// ```
/// use warren::infra::slugify;
///
/// assert_eq!(slugify("API Design"), "api-design");
/// assert_eq!(slugify("  weird -- spacing  "), "weird-spacing");
/// assert_eq!(slugify("!!!"), "untitled");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

/// Derives a display slug from a note path.
///
/// Used as the completion label for notes that declare neither a title nor
/// aliases. The note extension (and an encryption suffix, if any) is
/// stripped before slugifying.
///
/// # Examples
///
/// ```
/// use warren::infra::slug_from_path;
/// use std::path::Path;
///
/// assert_eq!(slug_from_path(Path::new("/notes/API Design.md")), "api-design");
/// assert_eq!(slug_from_path(Path::new("/notes/secrets.md.gpg")), "secrets");
/// ```
pub fn slug_from_path(path: &Path) -> String {
    slugify(&note_stem(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("CamelCase Words"), "camelcase-words");
    }

    #[test]
    fn slugify_collapses_punctuation_runs() {
        assert_eq!(slugify("a -- b!! c"), "a-b-c");
        assert_eq!(slugify("one...two"), "one-two");
    }

    #[test]
    fn slugify_trims_edges() {
        assert_eq!(slugify("  padded  "), "padded");
        assert_eq!(slugify("-leading-trailing-"), "leading-trailing");
    }

    #[test]
    fn slugify_empty_or_symbolic_is_untitled() {
        assert_eq!(slugify(""), "untitled");
        assert_eq!(slugify("???"), "untitled");
    }

    #[test]
    fn slugify_keeps_digits() {
        assert_eq!(slugify("2024 Review"), "2024-review");
    }

    #[test]
    fn slug_from_path_strips_note_extension() {
        assert_eq!(slug_from_path(Path::new("/n/My Note.md")), "my-note");
    }

    #[test]
    fn slug_from_path_strips_encryption_suffix() {
        assert_eq!(slug_from_path(Path::new("/n/journal.md.gpg")), "journal");
    }

    #[test]
    fn slug_from_path_uses_file_stem_only() {
        assert_eq!(slug_from_path(Path::new("/deep/nested/Topic Map.md")), "topic-map");
    }
}
