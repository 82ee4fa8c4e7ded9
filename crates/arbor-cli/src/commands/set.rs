use anyhow::{Context, anyhow};
use arbor_convert::{flatten_tree, materialize_document};
use arbor_core::{decode, write_document};
use arbor_schema::MetadataMap;
use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SetArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SetResponse {
    document: String,
    key: String,
    value: Value,
}

/// Handle `arbor set`: load, edit one value through the tree, write back.
pub fn handle(args: &SetArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (name, schema) = ctx.load_schema(args.schema.as_deref())?;
    let metadata = MetadataMap::from_schema(&schema)
        .with_context(|| format!("schema '{name}' has no properties"))?;
    let document = decode(&args.document)
        .with_context(|| format!("failed to read {}", args.document.display()))?;
    let mut built = materialize_document(&document, &metadata)
        .with_context(|| format!("failed to load {}", args.document.display()))?;

    let segments: Vec<&str> = args
        .key_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    let node = built
        .tree
        .find_path(&segments)
        .ok_or_else(|| anyhow!("no key '{}' in {}", args.key_path, args.document.display()))?;
    built.tree.edit_value(node, &args.value)?;

    let edited = flatten_tree(&built.tree).context("edited document cannot be written")?;
    let target = args.output.as_ref().unwrap_or(&args.document);
    write_document(target, &edited)
        .with_context(|| format!("failed to write {}", target.display()))?;
    ctx.remember_document(target);

    let value = segments
        .iter()
        .try_fold(&edited, |current, segment| match current {
            Value::Object(map) => map.get(*segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
        .cloned()
        .unwrap_or(Value::Null);

    output(
        &SetResponse {
            document: target.display().to_string(),
            key: args.key_path.clone(),
            value,
        },
        flags.format,
    )
}
