//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// warren - incremental link-graph index for markdown notes
#[derive(Parser, Debug)]
#[command(name = "warren", version, about, long_about = None)]
pub struct Cli {
    /// Notes directory (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rebuild or update the index (full incremental scan)
    Index(IndexArgs),

    /// List title/alias completions: label mapped to note path
    #[command(name = "ls")]
    List(ListArgs),

    /// Show notes that link to a given note
    Backlinks(BacklinksArgs),

    /// Print a note's canonical title, or its slug when untitled
    Title(TitleArgs),

    /// Resolve an external reference key to a note path
    Resolve(ResolveArgs),

    /// Re-index one changed note without a full scan
    Update(UpdateArgs),

    /// Move/rename a note and rewrite links that point at it
    Mv(MvArgs),

    /// Delete a note and drop it from the index
    Rm(RmArgs),

    /// Report stored links whose target is not an indexed note
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `index` command
#[derive(Parser, Debug)]
pub struct IndexArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `backlinks` command
#[derive(Parser, Debug)]
pub struct BacklinksArgs {
    /// Note path (absolute, or relative to the notes directory)
    pub path: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `title` command
#[derive(Parser, Debug)]
pub struct TitleArgs {
    /// Note path (absolute, or relative to the notes directory)
    pub path: PathBuf,
}

/// Arguments for the `resolve` command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// External reference key (e.g. a URL)
    pub key: String,
}

/// Arguments for the `update` command
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Note path (absolute, or relative to the notes directory)
    pub path: PathBuf,
}

/// Arguments for the `mv` command
#[derive(Parser, Debug)]
pub struct MvArgs {
    /// Current note path
    pub old: PathBuf,

    /// New note path
    pub new: PathBuf,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Note path (absolute, or relative to the notes directory)
    pub path: PathBuf,
}

/// Arguments for the `check` command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
