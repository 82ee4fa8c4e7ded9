//! Tree to document.
//!
//! Titles and descriptions are dropped. Leaves are coerced by their type tag;
//! array containers are rebuilt from their item rows, coerced by the array's
//! declared `items.type` when the node carries its schema fragment. Item rows
//! holding objects are skipped.

use arbor_core::{CoercionError, Record, ValueType, coerce_text, decode_str};
use arbor_tree::{NodeId, Tree};
use serde_json::{Map, Value};

use crate::error::ConvertError;

/// Rebuild the document fragment described by the sibling list `nodes`.
///
/// # Errors
///
/// - [`ConvertError::Coercion`] for the first value that does not read as its
///   declared type. Nothing is returned in that case.
/// - [`ConvertError::NotARecord`] for nodes narrower than five columns.
pub fn flatten(tree: &Tree, nodes: &[NodeId]) -> Result<Map<String, Value>, ConvertError> {
    let mut path = Vec::new();
    flatten_level(tree, nodes, &mut path)
}

/// Rebuild the whole document held by `tree`.
///
/// # Errors
///
/// Same as [`flatten`].
pub fn flatten_tree(tree: &Tree) -> Result<Value, ConvertError> {
    flatten(tree, tree.children(tree.root())).map(Value::Object)
}

fn flatten_level(
    tree: &Tree,
    nodes: &[NodeId],
    path: &mut Vec<String>,
) -> Result<Map<String, Value>, ConvertError> {
    let mut out = Map::new();
    for &id in nodes {
        let record = read_record(tree, id)?;
        path.push(record.key.clone());
        let value = flatten_node(tree, id, &record, path);
        path.pop();
        out.insert(record.key, value?);
    }
    Ok(out)
}

fn read_record(tree: &Tree, id: NodeId) -> Result<Record, ConvertError> {
    tree.node(id)
        .and_then(arbor_tree::Node::record)
        .ok_or(ConvertError::NotARecord(id))
}

fn flatten_node(
    tree: &Tree,
    id: NodeId,
    record: &Record,
    path: &mut Vec<String>,
) -> Result<Value, ConvertError> {
    let children = tree.children(id);
    let value_type = record.value_type();

    if children.is_empty() {
        let text = record.value.as_text();
        return coerce_leaf(&text, value_type).map_err(|source| ConvertError::Coercion {
            path: path.join("/"),
            source,
        });
    }

    if value_type == Some(ValueType::Object) {
        return flatten_level(tree, children, path).map(Value::Object);
    }

    let items_type = tree
        .node(id)
        .and_then(|node| node.metadata_value("items"))
        .and_then(|items| items.get("type"))
        .and_then(Value::as_str)
        .and_then(ValueType::from_tag);

    let mut items = Vec::with_capacity(children.len());
    for (index, &child) in children.iter().enumerate() {
        let item = read_record(tree, child)?;
        if item.value_type() == Some(ValueType::Object) {
            continue;
        }
        let text = item.value.as_text();
        let element = coerce_text(&text, items_type.or_else(|| item.value_type()));
        items.push(element.map_err(|source| ConvertError::Coercion {
            path: format!("{}/{index}", path.join("/")),
            source,
        })?);
    }
    Ok(Value::Array(items))
}

/// Leaf coercion. Object leaves are empty containers or compact JSON text.
fn coerce_leaf(text: &str, value_type: Option<ValueType>) -> Result<Value, CoercionError> {
    if value_type != Some(ValueType::Object) {
        return coerce_text(text, value_type);
    }
    if text.is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    match decode_str(text) {
        Ok(value @ Value::Object(_)) => Ok(value),
        _ => Err(CoercionError {
            text: text.to_string(),
            expected: ValueType::Object,
        }),
    }
}
