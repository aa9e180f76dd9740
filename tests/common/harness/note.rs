//! Programmatic note construction for tests.

/// A note file described as data, rendered to markdown on demand.
///
/// The file name is the note's identity (relative to the test
/// environment's notes directory); header fields are optional, matching
/// the indexer's tolerance for untitled notes.
#[derive(Debug, Clone)]
pub struct TestNote {
    name: String,
    title: Option<String>,
    aliases: Vec<String>,
    ref_key: Option<String>,
    body: String,
}

impl TestNote {
    /// Creates a note with the given file name (e.g. `"ideas.md"` or
    /// `"nested/f1.md"`) and an empty body.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            aliases: Vec::new(),
            ref_key: None,
            body: String::new(),
        }
    }

    /// Sets the canonical title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Adds one alias line (shell-quoting is the caller's concern).
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Sets the external reference key.
    pub fn ref_key(mut self, key: impl Into<String>) -> Self {
        self.ref_key = Some(key.into());
        self
    }

    /// Sets the markdown body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Appends a markdown link paragraph to the body.
    pub fn link_to(mut self, label: &str, dest: &str) -> Self {
        if !self.body.is_empty() {
            self.body.push('\n');
        }
        self.body.push_str(&format!("See [{label}]({dest}) here.\n"));
        self
    }

    /// Returns the note's file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders the note to markdown with YAML frontmatter.
    ///
    /// Notes without any header fields render as a bare body.
    pub fn render(&self) -> String {
        let has_header =
            self.title.is_some() || !self.aliases.is_empty() || self.ref_key.is_some();
        if !has_header {
            return self.body.clone();
        }

        let mut out = String::from("---\n");
        if let Some(title) = &self.title {
            out.push_str(&format!("title: {title}\n"));
        }
        if !self.aliases.is_empty() {
            out.push_str("aliases: |\n");
            for alias in &self.aliases {
                out.push_str(&format!("  {alias}\n"));
            }
        }
        if let Some(key) = &self.ref_key {
            out.push_str(&format!("ref: {key}\n"));
        }
        out.push_str("---\n");
        out.push_str(&self.body);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_note_renders_body_only() {
        let note = TestNote::new("a.md").body("just text\n");
        assert_eq!(note.render(), "just text\n");
    }

    #[test]
    fn full_header_renders_all_fields() {
        let note = TestNote::new("a.md")
            .title("A Title")
            .alias("\"two words\"")
            .ref_key("https://example.com")
            .body("body\n");
        let rendered = note.render();

        assert!(rendered.starts_with("---\n"));
        assert!(rendered.contains("title: A Title\n"));
        assert!(rendered.contains("  \"two words\"\n"));
        assert!(rendered.contains("ref: https://example.com\n"));
        assert!(rendered.ends_with("---\nbody\n"));
    }

    #[test]
    fn link_to_appends_paragraph() {
        let note = TestNote::new("a.md").link_to("b", "b.md");
        assert!(note.render().contains("[b](b.md)"));
    }
}
