//! Backlinks command handler.

use anyhow::Result;
use std::path::Path;

use super::{open_index, resolve_note_arg, truncate_str};
use crate::cli::BacklinksArgs;
use crate::cli::output::{BacklinkListing, Output, OutputFormat};

pub fn handle_backlinks(args: &BacklinksArgs, notes_dir: &Path) -> Result<()> {
    let index = open_index(notes_dir)?;
    let path = resolve_note_arg(notes_dir, &args.path)?;
    let backlinks = index.backlinks(&path)?;

    match args.format {
        OutputFormat::Json => {
            let listings: Vec<BacklinkListing> = backlinks
                .into_iter()
                .map(|b| BacklinkListing {
                    source: b.source.display().to_string(),
                    excerpt: b.excerpt,
                    offset: b.offset,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
        OutputFormat::Human => {
            if backlinks.is_empty() {
                println!("No backlinks to {}", path.display());
                return Ok(());
            }
            for backlink in backlinks {
                println!(
                    "{} [{}]\n    {}",
                    backlink.source.display(),
                    backlink.offset,
                    truncate_str(&backlink.excerpt, 100)
                );
            }
        }
    }

    Ok(())
}
