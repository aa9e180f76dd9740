//! Mv (rename hook) command handler.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

use super::{open_index, resolve_note_arg};
use crate::cli::MvArgs;
use crate::index::GraphStore;
use crate::infra::is_note_path;

pub fn handle_mv(args: &MvArgs, notes_dir: &Path, verbose: bool) -> Result<()> {
    let mut index = open_index(notes_dir)?;
    let old = resolve_note_arg(notes_dir, &args.old)?;
    let new = resolve_note_arg(notes_dir, &args.new)?;

    if !old.exists() {
        bail!("note not found: {}", old.display());
    }
    // Collision is a user error surfaced before anything is touched
    if new.exists() {
        bail!("destination already exists: {}", new.display());
    }
    if index.store().contains_note(&new)? {
        bail!("destination is already indexed: {}", new.display());
    }
    if !is_note_path(&new) && verbose {
        eprintln!(
            "warning: {} is not a note path; it will not be indexed",
            new.display()
        );
    }

    if let Some(parent) = new.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::rename(&old, &new).with_context(|| {
        format!("failed to rename {} to {}", old.display(), new.display())
    })?;

    let outcome = index
        .on_rename(&old, &new)
        .with_context(|| "failed to update the index after rename")?;

    if verbose {
        println!(
            "Renamed {} -> {} ({} referencing notes rewritten)",
            old.display(),
            new.display(),
            outcome.rewritten.len()
        );
    }
    Ok(())
}
