//! Check command handler: dangling-link report.

use anyhow::Result;
use std::path::Path;

use super::open_index;
use crate::cli::CheckArgs;
use crate::cli::output::{DanglingListing, Output, OutputFormat};

pub fn handle_check(args: &CheckArgs, notes_dir: &Path) -> Result<()> {
    let index = open_index(notes_dir)?;
    let dangling = index.dangling_links()?;

    match args.format {
        OutputFormat::Json => {
            let listings: Vec<DanglingListing> = dangling
                .into_iter()
                .map(|link| DanglingListing {
                    source: link.source.display().to_string(),
                    target: link.target.display().to_string(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
        OutputFormat::Human => {
            if dangling.is_empty() {
                println!("No dangling links");
                return Ok(());
            }
            println!("{} dangling links:", dangling.len());
            for link in dangling {
                println!("  {} -> {}", link.source.display(), link.target.display());
            }
        }
    }

    Ok(())
}
