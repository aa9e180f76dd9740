//! warren - incremental link-graph index for markdown notes

pub mod cli;
pub mod domain;
pub mod index;
pub mod infra;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_backlinks, handle_check, handle_completions, handle_index, handle_list, handle_mv,
        handle_resolve, handle_rm, handle_title, handle_update,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let notes_dir = config.notes_dir(cli.dir.as_ref());
    let verbose = cli.verbose > 0;

    match &cli.command {
        Command::Index(args) => handle_index(args, &notes_dir, verbose),
        Command::List(args) => handle_list(args, &notes_dir),
        Command::Backlinks(args) => handle_backlinks(args, &notes_dir),
        Command::Title(args) => handle_title(args, &notes_dir),
        Command::Resolve(args) => handle_resolve(args, &notes_dir),
        Command::Update(args) => handle_update(args, &notes_dir, verbose),
        Command::Mv(args) => handle_mv(args, &notes_dir, verbose),
        Command::Rm(args) => handle_rm(args, &notes_dir, verbose),
        Command::Check(args) => handle_check(args, &notes_dir),
        Command::Completions(args) => handle_completions(args),
    }
}
