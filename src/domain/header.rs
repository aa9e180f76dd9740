//! Note header metadata: title, aliases, reference key.

/// Metadata declared in a note's frontmatter.
///
/// `titles()` yields the canonical title first, then the aliases, which is
/// the order the index stores them in. A note that declares aliases but no
/// title is legal; its alias list alone becomes the title set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    title: Option<String>,
    aliases: Vec<String>,
    ref_key: Option<String>,
}

impl Header {
    pub fn new(title: Option<String>, aliases: Vec<String>, ref_key: Option<String>) -> Self {
        Self {
            title,
            aliases,
            ref_key,
        }
    }

    /// Returns the canonical title, if declared.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the declared aliases.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns the external reference key, if declared.
    pub fn ref_key(&self) -> Option<&str> {
        self.ref_key.as_deref()
    }

    /// Returns the full title set: canonical title first, then aliases.
    pub fn titles(&self) -> Vec<String> {
        let mut titles = Vec::with_capacity(self.aliases.len() + 1);
        if let Some(title) = &self.title {
            titles.push(title.clone());
        }
        titles.extend(self.aliases.iter().cloned());
        titles
    }
}

/// Splits one alias line into words, honoring shell-style quoting.
///
/// `"api design" drafts` yields `["api design", "drafts"]`. Single quotes
/// are literal; inside double quotes a backslash escapes the next
/// character. An unterminated quote keeps whatever accumulated, rather
/// than rejecting the line.
pub fn tokenize_alias_line(line: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut chars = line.chars();
    let mut in_single = false;
    let mut in_double = false;
    let mut quoted = false;

    while let Some(ch) = chars.next() {
        if in_single {
            if ch == '\'' {
                in_single = false;
            } else {
                cur.push(ch);
            }
            continue;
        }
        if in_double {
            match ch {
                '"' => in_double = false,
                '\\' => {
                    if let Some(next) = chars.next() {
                        cur.push(next);
                    }
                }
                _ => cur.push(ch),
            }
            continue;
        }
        match ch {
            '\'' => {
                in_single = true;
                quoted = true;
            }
            '"' => {
                in_double = true;
                quoted = true;
            }
            '\\' => {
                if let Some(next) = chars.next() {
                    cur.push(next);
                }
            }
            c if c.is_whitespace() => {
                if !cur.is_empty() || quoted {
                    out.push(std::mem::take(&mut cur));
                }
                quoted = false;
            }
            _ => cur.push(ch),
        }
    }
    if !cur.is_empty() || quoted {
        out.push(cur);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // Header
    // ===========================================

    #[test]
    fn titles_puts_canonical_first() {
        let header = Header::new(
            Some("Main".to_string()),
            vec!["alt-a".to_string(), "alt-b".to_string()],
            None,
        );
        assert_eq!(header.titles(), vec!["Main", "alt-a", "alt-b"]);
    }

    #[test]
    fn titles_without_title_is_alias_list() {
        let header = Header::new(None, vec!["only-alias".to_string()], None);
        assert_eq!(header.titles(), vec!["only-alias"]);
    }

    #[test]
    fn titles_empty_header_is_empty() {
        assert!(Header::default().titles().is_empty());
    }

    #[test]
    fn ref_key_round_trips() {
        let header = Header::new(None, vec![], Some("https://example.com/x".to_string()));
        assert_eq!(header.ref_key(), Some("https://example.com/x"));
    }

    // ===========================================
    // Alias tokenization
    // ===========================================

    #[test]
    fn tokenize_splits_on_whitespace() {
        assert_eq!(tokenize_alias_line("one two three"), ["one", "two", "three"]);
    }

    #[test]
    fn tokenize_double_quotes_keep_spaces() {
        assert_eq!(
            tokenize_alias_line(r#""api design" drafts"#),
            ["api design", "drafts"]
        );
    }

    #[test]
    fn tokenize_single_quotes_are_literal() {
        assert_eq!(tokenize_alias_line("'it\"s' here"), ["it\"s", "here"]);
    }

    #[test]
    fn tokenize_backslash_escapes_inside_double_quotes() {
        assert_eq!(tokenize_alias_line(r#""a \"b\" c""#), [r#"a "b" c"#]);
    }

    #[test]
    fn tokenize_empty_line_yields_nothing() {
        assert!(tokenize_alias_line("").is_empty());
        assert!(tokenize_alias_line("   ").is_empty());
    }

    #[test]
    fn tokenize_unterminated_quote_keeps_partial() {
        assert_eq!(tokenize_alias_line("\"half done"), ["half done"]);
    }

    #[test]
    fn tokenize_empty_quoted_token_survives() {
        assert_eq!(tokenize_alias_line("a \"\" b"), ["a", "", "b"]);
    }
}
