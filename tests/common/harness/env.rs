//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::{TestNote, WarrenCommand};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary notes directory.
///
/// Creates a temp directory that is automatically cleaned up on drop.
/// Provides methods for adding test notes and running the CLI against
/// the directory.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the notes directory
    notes_dir: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let notes_dir = temp_dir
            .path()
            .canonicalize()
            .expect("Failed to resolve temp directory");
        Self {
            _temp_dir: temp_dir,
            notes_dir,
        }
    }

    /// Returns the path to the notes directory.
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Returns the path where the index database is stored.
    pub fn index_path(&self) -> PathBuf {
        self.notes_dir.join(".index").join("graph.db")
    }

    /// Returns the absolute path of a note file by name.
    pub fn note_path(&self, name: &str) -> PathBuf {
        self.notes_dir.join(name)
    }

    /// Adds a test note to the environment and returns its path.
    pub fn add_note(&self, note: &TestNote) -> PathBuf {
        self.write_file(note.name(), &note.render())
    }

    /// Writes a file to the test environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.notes_dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Reads a note file back as a string.
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.note_path(name)).expect("Failed to read file")
    }

    /// Creates a WarrenCommand configured for this test environment.
    pub fn cmd(&self) -> WarrenCommand {
        WarrenCommand::new().dir(&self.notes_dir)
    }

    /// Builds the index by running the `index` command.
    pub fn build_index(&self) {
        self.cmd().index().assert().success();
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
