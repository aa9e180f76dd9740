//! Link and metadata extraction from note content.
//!
//! One structural pass per file: the frontmatter is parsed once into a
//! [`Header`] and the body once with `pulldown_cmark`'s offset iterator,
//! so extraction cost stays linear in file size. Extraction is read-only;
//! it never touches the source file.

use crate::domain::NoteLink;
use crate::infra::{is_note_path, normalize_path, parse_header, split};
use pulldown_cmark::{Event, Options, Parser, Tag};
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Everything the index stores about one note's content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Canonical title first, then aliases. Empty for untitled notes.
    pub titles: Vec<String>,
    /// External reference key, if declared.
    pub ref_key: Option<String>,
    /// Outbound links to other note paths, in document order.
    pub links: Vec<NoteLink>,
}

/// A raw inline link as written in the source text.
///
/// Used by the rename hook to rewrite destinations on disk; `span` covers
/// the whole `[label](dest)` inline element in file offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOccurrence {
    pub span: Range<usize>,
    pub dest: String,
    pub label: String,
}

/// Extracts titles, ref key, and outbound links from one note.
///
/// `path` must be the note's absolute resolved path; relative link
/// destinations resolve against its directory. Malformed frontmatter
/// degrades to an empty header rather than failing the file.
pub fn extract(path: &Path, content: &str) -> Extraction {
    let header = parse_header(content).unwrap_or_default();
    Extraction {
        titles: header.titles(),
        ref_key: header.ref_key().map(str::to_string),
        links: extract_links(path, content),
    }
}

/// Returns the file-offset spans of all inline links in the content.
///
/// Unlike [`extract`], destinations are reported verbatim, without
/// resolution or note-path filtering; the caller decides which ones it
/// cares about.
pub fn link_occurrences(content: &str) -> Vec<LinkOccurrence> {
    let (body, body_offset) = body_of(content);

    let mut open: Vec<(Range<usize>, String, String)> = Vec::new();
    let mut occurrences = Vec::new();

    for (event, range) in Parser::new_ext(body, Options::empty()).into_offset_iter() {
        match event {
            Event::Start(Tag::Link(_, dest, _)) => {
                open.push((range, dest.to_string(), String::new()));
            }
            Event::End(Tag::Link(..)) => {
                if let Some((span, dest, label)) = open.pop() {
                    occurrences.push(LinkOccurrence {
                        span: body_offset + span.start..body_offset + span.end,
                        dest,
                        label,
                    });
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, _, label)) = open.last_mut() {
                    label.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, _, label)) = open.last_mut() {
                    label.push(' ');
                }
            }
            _ => {}
        }
    }

    occurrences.sort_by_key(|occ| occ.span.start);
    occurrences
}

/// Resolves a link destination to a note path, if it is one.
///
/// Non-note destinations (URLs, anchors, wrong extensions) resolve to
/// `None`. A fragment suffix (`b.md#section`) is stripped before the
/// extension check.
pub fn resolve_note_target(source_dir: &Path, dest: &str) -> Option<PathBuf> {
    let dest = dest.split('#').next().unwrap_or(dest);
    if dest.is_empty() || has_url_scheme(dest) {
        return None;
    }
    let dest_path = Path::new(dest);
    let absolute = if dest_path.is_absolute() {
        dest_path.to_path_buf()
    } else {
        source_dir.join(dest_path)
    };
    let normalized = normalize_path(&absolute);
    is_note_path(&normalized).then_some(normalized)
}

fn extract_links(source: &Path, content: &str) -> Vec<NoteLink> {
    let (body, body_offset) = body_of(content);
    let source_dir = source.parent().unwrap_or_else(|| Path::new("/"));

    // Innermost enclosing block element is the top of this stack
    let mut blocks: Vec<Range<usize>> = Vec::new();
    let mut links = Vec::new();

    for (event, range) in Parser::new_ext(body, Options::empty()).into_offset_iter() {
        match event {
            Event::Start(tag) if is_block_tag(&tag) => blocks.push(range),
            Event::End(tag) if is_block_tag(&tag) => {
                blocks.pop();
            }
            Event::Start(Tag::Link(_, dest, _)) => {
                if let Some(target) = resolve_note_target(source_dir, &dest) {
                    let block = blocks.last().cloned().unwrap_or(range);
                    let raw = &body[block.clone()];
                    let leading = raw.len() - raw.trim_start().len();
                    links.push(NoteLink::new(
                        target,
                        raw.trim(),
                        body_offset + block.start + leading,
                    ));
                }
            }
            _ => {}
        }
    }
    links
}

fn body_of(content: &str) -> (&str, usize) {
    match split(content) {
        Some(parts) => (parts.body, parts.body_offset),
        None => (content, 0),
    }
}

fn is_block_tag(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::BlockQuote
    )
}

fn has_url_scheme(dest: &str) -> bool {
    let Some(colon) = dest.find(':') else {
        return false;
    };
    if colon == 0 {
        return false;
    }
    let scheme = &dest[..colon];
    scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
