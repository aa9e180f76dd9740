//! Title and resolve command handlers.

use anyhow::{Result, bail};
use std::path::Path;

use super::{open_index, resolve_note_arg};
use crate::cli::{ResolveArgs, TitleArgs};

pub fn handle_title(args: &TitleArgs, notes_dir: &Path) -> Result<()> {
    let index = open_index(notes_dir)?;
    let path = resolve_note_arg(notes_dir, &args.path)?;
    println!("{}", index.title_or_slug(&path)?);
    Ok(())
}

pub fn handle_resolve(args: &ResolveArgs, notes_dir: &Path) -> Result<()> {
    let index = open_index(notes_dir)?;
    match index.resolve_ref(&args.key)? {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => bail!("no note found for ref key '{}'", args.key),
    }
}
