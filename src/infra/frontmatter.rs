//! Frontmatter parsing for note headers.
//!
//! Notes carry their metadata in a YAML block delimited by `---` lines at
//! the very top of the file. The block is parsed once per file into a
//! [`Header`]; nothing downstream re-scans the text per property.

use crate::domain::{Header, tokenize_alias_line};
use serde::Deserialize;
use thiserror::Error;

/// A note's content split at the frontmatter boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitContent<'a> {
    /// The YAML between the delimiters, without the delimiter lines.
    pub yaml: &'a str,
    /// The note body after the closing delimiter.
    pub body: &'a str,
    /// Byte offset of `body` within the original content.
    pub body_offset: usize,
}

/// Errors during frontmatter parsing.
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("invalid YAML in frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

// Raw deserialization target; field shapes are loose on purpose so that a
// malformed property degrades to absent instead of failing the file.
#[derive(Debug, Default, Deserialize)]
struct RawHeader {
    title: Option<serde_yaml::Value>,
    aliases: Option<serde_yaml::Value>,
    #[serde(rename = "ref")]
    ref_key: Option<serde_yaml::Value>,
}

/// Splits content into frontmatter YAML and body.
///
/// Returns `None` when there is no frontmatter block: the content does not
/// start with a `---` line, or the closing `---` line is missing. Callers
/// treat that as "no header", not an error.
pub fn split(content: &str) -> Option<SplitContent<'_>> {
    let after_opening = if let Some(rest) = content.strip_prefix("---\r\n") {
        content.len() - rest.len()
    } else if let Some(rest) = content.strip_prefix("---\n") {
        content.len() - rest.len()
    } else {
        return None;
    };

    let yaml_and_rest = &content[after_opening..];
    let closing_pos = find_closing_delimiter(yaml_and_rest)?;
    let yaml = &yaml_and_rest[..closing_pos];

    let after_closing = &yaml_and_rest[closing_pos..];
    let delimiter_len = if after_closing.starts_with("---\r\n") {
        5
    } else if after_closing.starts_with("---\n") {
        4
    } else {
        3 // "---" at EOF
    };

    let body_offset = after_opening + closing_pos + delimiter_len;
    Some(SplitContent {
        yaml,
        body: &content[body_offset..],
        body_offset,
    })
}

/// Parses the header properties out of note content.
///
/// Content without a frontmatter block parses to an empty header. Alias
/// values are a multi-line string; every line is shell-tokenized via
/// [`tokenize_alias_line`] so quoted multi-word aliases survive. A property
/// of the wrong YAML shape is dropped, not fatal.
///
/// # Errors
///
/// Returns [`HeaderError::InvalidYaml`] only when the frontmatter block
/// itself is not valid YAML.
pub fn parse_header(content: &str) -> Result<Header, HeaderError> {
    let Some(parts) = split(content) else {
        return Ok(Header::default());
    };

    let raw: RawHeader = serde_yaml::from_str(parts.yaml)?;
    Ok(Header::new(
        raw.title.as_ref().and_then(scalar_to_string),
        raw.aliases.as_ref().map(parse_aliases).unwrap_or_default(),
        raw.ref_key.as_ref().and_then(scalar_to_string),
    ))
}

fn parse_aliases(value: &serde_yaml::Value) -> Vec<String> {
    match value {
        serde_yaml::Value::String(text) => text
            .lines()
            .flat_map(tokenize_alias_line)
            .filter(|alias| !alias.is_empty())
            .collect(),
        // A YAML list also works; each element is one alias line.
        serde_yaml::Value::Sequence(items) => items
            .iter()
            .filter_map(scalar_to_string)
            .flat_map(|line| tokenize_alias_line(&line))
            .filter(|alias| !alias.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Finds the position of the closing `---` delimiter.
///
/// The delimiter must start a line and be exactly `---` followed by a
/// newline or EOF.
fn find_closing_delimiter(content: &str) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        if content[pos..].starts_with("---") {
            let after = pos + 3;
            if after >= bytes.len()
                || bytes[after] == b'\n'
                || (bytes[after] == b'\r' && bytes.get(after + 1) == Some(&b'\n'))
            {
                return Some(pos);
            }
        }
        match content[pos..].find('\n') {
            Some(newline_offset) => pos += newline_offset + 1,
            None => break,
        }
    }
    None
}
