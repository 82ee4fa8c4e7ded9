use std::fs;
use std::path::Path;

use anyhow::Context;
use arbor_search::{CheckStatus, DirectoryCheck, IndexStore};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::IndexCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct Built {
    directory: String,
    files: usize,
}

#[derive(Debug, Serialize)]
struct IndexEntry {
    directory: String,
    id: u64,
    files: Option<usize>,
    indexed_at: Option<String>,
}

/// Handle `arbor index`.
pub fn handle(action: &IndexCommands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut store = ctx.index_store()?;
    match action {
        IndexCommands::Build { dir } => {
            let files = store
                .index_directory(dir)
                .with_context(|| format!("failed to index {}", dir.display()))?;
            ctx.session.last_dir = Some(dir.clone());
            output(
                &Built {
                    directory: dir.display().to_string(),
                    files: files.len(),
                },
                flags.format,
            )
        }
        IndexCommands::Check { dir: Some(dir) } => {
            let status = if !dir.is_dir() {
                CheckStatus::Missing
            } else if store
                .check(dir)
                .with_context(|| format!("failed to check {}", dir.display()))?
            {
                CheckStatus::Refreshed
            } else {
                CheckStatus::Fresh
            };
            output(
                &[DirectoryCheck {
                    directory: dir.clone(),
                    status,
                }],
                flags.format,
            )
        }
        IndexCommands::Check { dir: None } => output(&store.watchdog(), flags.format),
        IndexCommands::List => output(&list_entries(&store), flags.format),
    }
}

fn list_entries(store: &IndexStore) -> Vec<IndexEntry> {
    store
        .directories()
        .map(|(directory, id)| {
            let files = store
                .load_index(Path::new(directory))
                .map(|index| index.files.len())
                .ok();
            let indexed_at = fs::metadata(store.index_path(id))
                .and_then(|meta| meta.modified())
                .ok()
                .map(|time| DateTime::<Utc>::from(time).to_rfc3339());
            IndexEntry {
                directory: directory.to_string(),
                id,
                files,
                indexed_at,
            }
        })
        .collect()
}
