use std::path::{Path, PathBuf};

use anyhow::Context;
use arbor_search::{SearchQuery, schema_matching_search, value_search};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SearchCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct Hit {
    path: String,
}

/// Handle `arbor search`.
pub fn handle(action: &SearchCommands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        SearchCommands::Values { terms, regex, dir } => {
            let parse = if *regex {
                SearchQuery::parse
            } else {
                SearchQuery::parse_literal
            };
            let queries = terms
                .iter()
                .map(|term| parse(term))
                .collect::<Result<Vec<_>, _>>()
                .context("invalid search term")?;
            let dir = ctx.search_dir(dir.as_deref())?;
            let files = indexed_files(ctx, &dir)?;
            output(&hits(value_search(&files, &queries)), flags.format)
        }
        SearchCommands::Schema { schema, dir } => {
            let (name, schema) = ctx.load_schema(schema.as_deref())?;
            let dir = ctx.search_dir(dir.as_deref())?;
            let files = indexed_files(ctx, &dir)?;
            let kept = schema_matching_search(&files, &schema)
                .with_context(|| format!("cannot search with schema '{name}'"))?;
            output(&hits(kept), flags.format)
        }
    }
}

/// Current file list of `dir`: refreshed when stale, built when missing.
fn indexed_files(ctx: &AppContext, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut store = ctx.index_store()?;
    let files = match store.load_index(dir) {
        Ok(_) => {
            store
                .check(dir)
                .with_context(|| format!("failed to refresh index of {}", dir.display()))?;
            store.load_index(dir)?.files
        }
        Err(arbor_search::SearchError::NotIndexed(_)) => store
            .index_directory(dir)
            .with_context(|| format!("failed to index {}", dir.display()))?,
        Err(error) => return Err(error).context("failed to read index"),
    };
    Ok(files)
}

fn hits(paths: Vec<PathBuf>) -> Vec<Hit> {
    paths
        .into_iter()
        .map(|path| Hit {
            path: path.display().to_string(),
        })
        .collect()
}
