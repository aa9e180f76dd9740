//! Index command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::{ConsoleReporter, open_index};
use crate::cli::IndexArgs;
use crate::cli::output::{Output, OutputFormat};

pub fn handle_index(args: &IndexArgs, notes_dir: &Path, verbose: bool) -> Result<()> {
    let mut index = open_index(notes_dir)?;
    let mut reporter = ConsoleReporter::new(verbose);

    let stats = index
        .build_with_progress(&mut reporter)
        .with_context(|| "failed to build index")?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(&stats))?);
        }
        OutputFormat::Human => {
            if stats.is_noop() {
                println!("Index up to date");
            } else {
                println!(
                    "Indexed {} notes ({} links, {} titles, {} refs), removed {}",
                    stats.files_updated,
                    stats.links_inserted,
                    stats.titles_updated,
                    stats.refs_updated,
                    stats.notes_deleted
                );
            }
        }
    }

    Ok(())
}
