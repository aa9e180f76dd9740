//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single completion in listing output.
#[derive(Debug, Serialize)]
pub struct CompletionListing {
    pub label: String,
    pub path: String,
}

/// A single backlink in listing output.
#[derive(Debug, Serialize)]
pub struct BacklinkListing {
    pub source: String,
    pub excerpt: String,
    pub offset: usize,
}

/// A dangling link in `check` output.
#[derive(Debug, Serialize)]
pub struct DanglingListing {
    pub source: String,
    pub target: String,
}
