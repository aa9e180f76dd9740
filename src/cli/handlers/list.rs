//! List (ls) command handler.

use anyhow::Result;
use std::path::Path;

use super::{open_index, truncate_str};
use crate::cli::ListArgs;
use crate::cli::output::{CompletionListing, Output, OutputFormat};

pub fn handle_list(args: &ListArgs, notes_dir: &Path) -> Result<()> {
    let index = open_index(notes_dir)?;
    let completions = index.completions()?;

    match args.format {
        OutputFormat::Json => {
            let listings: Vec<CompletionListing> = completions
                .into_iter()
                .map(|c| CompletionListing {
                    label: c.label,
                    path: c.path.display().to_string(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
        OutputFormat::Human => {
            if completions.is_empty() {
                println!("No notes indexed");
                return Ok(());
            }
            for completion in completions {
                println!(
                    "{:<40} {}",
                    truncate_str(&completion.label, 40),
                    completion.path.display()
                );
            }
        }
    }

    Ok(())
}
