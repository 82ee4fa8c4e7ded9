use anyhow::Context;
use arbor_core::{decode, write_document};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DefaultCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct Saved {
    schema: String,
    path: String,
}

/// Handle `arbor default`.
pub fn handle(action: &DefaultCommands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        DefaultCommands::Save { document, schema } => {
            let name = ctx.schema_name(schema.as_deref());
            let value = decode(document)
                .with_context(|| format!("failed to read {}", document.display()))?;
            let path = ctx.schema_store()?.save_default(&name, &value)?;
            output(
                &Saved {
                    schema: name,
                    path: path.display().to_string(),
                },
                flags.format,
            )
        }
        DefaultCommands::Load { schema, output: target } => {
            let name = ctx.schema_name(schema.as_deref());
            let value = ctx
                .schema_store()?
                .load_default(&name)
                .with_context(|| format!("no default document for schema '{name}'"))?;
            let Some(path) = target else {
                return output(&value, flags.format);
            };
            write_document(path, &value)
                .with_context(|| format!("failed to write {}", path.display()))?;
            ctx.remember_document(path);
            output(
                &Saved {
                    schema: name,
                    path: path.display().to_string(),
                },
                flags.format,
            )
        }
    }
}
