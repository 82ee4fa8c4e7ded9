use anyhow::Context;
use arbor_convert::{IssueKind, SchemaIssue, materialize_document};
use arbor_core::{Record, decode};
use arbor_schema::MetadataMap;
use arbor_tree::{NodeId, Tree};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ShowArgs;
use crate::context::AppContext;
use crate::output::output;

/// One displayed row.
#[derive(Debug, Serialize)]
struct ShowRow {
    path: String,
    title: String,
    value: String,
    #[serde(rename = "type")]
    type_tag: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    issue: Option<IssueKind>,
}

/// Handle `arbor show`.
pub fn handle(args: &ShowArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (name, schema) = ctx.load_schema(args.schema.as_deref())?;
    let metadata = MetadataMap::from_schema(&schema)
        .with_context(|| format!("schema '{name}' has no properties"))?;
    let document = decode(&args.document)
        .with_context(|| format!("failed to read {}", args.document.display()))?;
    let built = materialize_document(&document, &metadata)
        .with_context(|| format!("failed to load {}", args.document.display()))?;
    ctx.remember_document(&args.document);

    if !built.issues.is_empty() {
        tracing::warn!(
            document = %args.document.display(),
            issues = built.issues.len(),
            "document deviates from schema '{name}'"
        );
    }

    if args.dump {
        print!("{}", built.tree);
        return Ok(());
    }

    let highlight = ctx.config.general.show_error_representation;
    let rows = collect_rows(&built.tree, &built.issues, highlight);
    output(&rows, flags.format)
}

fn collect_rows(tree: &Tree, issues: &[SchemaIssue], highlight: bool) -> Vec<ShowRow> {
    let mut rows = Vec::with_capacity(tree.len());
    let mut path = Vec::new();
    push_rows(tree, tree.root(), &mut path, issues, highlight, &mut rows);
    rows
}

fn push_rows(
    tree: &Tree,
    parent: NodeId,
    path: &mut Vec<String>,
    issues: &[SchemaIssue],
    highlight: bool,
    rows: &mut Vec<ShowRow>,
) {
    for (index, &child) in tree.children(parent).iter().enumerate() {
        let Some(record) = tree.node(child).and_then(arbor_tree::Node::record) else {
            continue;
        };
        let Record {
            key,
            title,
            value,
            type_tag,
            description,
        } = record;
        path.push(if key.is_empty() { index.to_string() } else { key });

        let joined = path.join("/");
        let issue = if highlight {
            issues
                .iter()
                .find(|issue| issue.path == joined)
                .map(|issue| issue.kind)
        } else {
            None
        };
        rows.push(ShowRow {
            path: joined,
            title,
            value: value.as_text().into_owned(),
            type_tag,
            description,
            issue,
        });

        push_rows(tree, child, path, issues, highlight, rows);
        path.pop();
    }
}
