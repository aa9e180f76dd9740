//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `warren` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct WarrenCommand {
    args: Vec<String>,
}

impl WarrenCommand {
    /// Creates a new command for the `warren` binary.
    pub fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// Sets the `--dir` option to specify the notes directory.
    pub fn dir(mut self, path: &Path) -> Self {
        self.args.push("--dir".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Runs the command and returns an Assert for making assertions.
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("warren").expect("Failed to find warren binary");
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `index` command.
    pub fn index(self) -> Self {
        self.args(["index"])
    }

    /// Configures for the `ls` command.
    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Configures for the `backlinks` command with a path.
    pub fn backlinks(self, path: &str) -> Self {
        self.args(["backlinks", path])
    }

    /// Configures for the `title` command with a path.
    pub fn title(self, path: &str) -> Self {
        self.args(["title", path])
    }

    /// Configures for the `resolve` command with a ref key.
    pub fn resolve(self, key: &str) -> Self {
        self.args(["resolve", key])
    }

    /// Configures for the `update` command with a path.
    pub fn update(self, path: &str) -> Self {
        self.args(["update", path])
    }

    /// Configures for the `mv` command with old and new paths.
    pub fn mv(self, old: &str, new: &str) -> Self {
        self.args(["mv", old, new])
    }

    /// Configures for the `rm` command with a path.
    pub fn rm(self, path: &str) -> Self {
        self.args(["rm", path])
    }

    /// Configures for the `check` command.
    pub fn check(self) -> Self {
        self.args(["check"])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }

    /// Adds `-v` to the command.
    pub fn verbose(self) -> Self {
        self.args(["-v"])
    }
}

impl Default for WarrenCommand {
    fn default() -> Self {
        Self::new()
    }
}
