use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SchemaCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StoredSchema {
    name: String,
    path: String,
}

#[derive(Debug, Serialize)]
struct SchemaEntry {
    name: String,
    current: bool,
}

/// Handle `arbor schema`.
pub fn handle(action: &SchemaCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx.schema_store()?;
    match action {
        SchemaCommands::Init => {
            let path = store.deploy_default_schema()?;
            output(&stored(&path), flags.format)
        }
        SchemaCommands::Add { source } => {
            let path = store
                .add_schema(source)
                .with_context(|| format!("failed to add schema {}", source.display()))?;
            output(&stored(&path), flags.format)
        }
        SchemaCommands::List => {
            let current = &ctx.session.last_schema;
            let entries = store
                .list()?
                .into_iter()
                .map(|name| SchemaEntry {
                    current: &name == current,
                    name,
                })
                .collect::<Vec<_>>();
            output(&entries, flags.format)
        }
    }
}

fn stored(path: &std::path::Path) -> StoredSchema {
    StoredSchema {
        name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        path: path.display().to_string(),
    }
}
