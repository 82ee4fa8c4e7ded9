use anyhow::Context;
use arbor_core::write_document;
use arbor_schema::blank_document;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BlankArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct Written {
    schema: String,
    path: String,
}

/// Handle `arbor blank`.
pub fn handle(args: &BlankArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (name, schema) = ctx.load_schema(args.schema.as_deref())?;
    let document =
        blank_document(&schema).with_context(|| format!("schema '{name}' has no properties"))?;

    let Some(path) = &args.output else {
        return output(&document, flags.format);
    };
    write_document(path, &document)
        .with_context(|| format!("failed to write {}", path.display()))?;
    ctx.remember_document(path);
    output(
        &Written {
            schema: name,
            path: path.display().to_string(),
        },
        flags.format,
    )
}
