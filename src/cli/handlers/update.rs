//! Update (save hook) and rm (delete hook) command handlers.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

use super::{open_index, resolve_note_arg};
use crate::cli::{RmArgs, UpdateArgs};

pub fn handle_update(args: &UpdateArgs, notes_dir: &Path, verbose: bool) -> Result<()> {
    let mut index = open_index(notes_dir)?;
    let path = resolve_note_arg(notes_dir, &args.path)?;
    if !path.exists() {
        bail!("note not found: {}", path.display());
    }

    index
        .on_save(&path)
        .with_context(|| format!("failed to re-index {}", path.display()))?;

    if verbose {
        println!("Re-indexed {}", path.display());
    }
    Ok(())
}

pub fn handle_rm(args: &RmArgs, notes_dir: &Path, verbose: bool) -> Result<()> {
    let mut index = open_index(notes_dir)?;
    let path = resolve_note_arg(notes_dir, &args.path)?;
    if !path.exists() {
        bail!("note not found: {}", path.display());
    }

    fs::remove_file(&path).with_context(|| format!("failed to delete {}", path.display()))?;
    index
        .on_delete(&path)
        .with_context(|| format!("failed to drop {} from the index", path.display()))?;

    if verbose {
        println!("Deleted {}", path.display());
    }
    Ok(())
}
