//! Document to tree.
//!
//! The document drives the traversal: keys are visited in document order and
//! looked up in the metadata, never the other way around. Each nested object
//! is built into its own temporary [`Tree`] and grafted under its container
//! row, so observers of the target see one insert per spliced level.

use arbor_core::{Cell, Column, Record, Row, ValueType, display_text};
use arbor_schema::{FieldMeta, MetaEntry, MetadataMap};
use arbor_tree::{NodeId, Tree};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ConvertError;

pub const KEY_ERROR_TITLE: &str = "KeyError";
pub const KEY_ERROR_DESCRIPTION: &str =
    "The key is not present in the current hierarchy level of the schema.";
pub const VALUE_ERROR_TITLE: &str = "ValueError";
pub const VALUE_ERROR_DESCRIPTION: &str =
    "Because of a structural mismatch, data that was read from the schema is invalid.";
pub const ARRAY_ITEM_DESCRIPTION: &str = "Array Item";

/// Why a row was substituted with an error row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// The schema declares no such key at this level.
    KeyMissing,
    /// The schema declares the key with a different shape.
    StructuralMismatch,
}

impl IssueKind {
    /// Marker placed in the title column of the error row.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::KeyMissing => KEY_ERROR_TITLE,
            Self::StructuralMismatch => VALUE_ERROR_TITLE,
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::KeyMissing => KEY_ERROR_DESCRIPTION,
            Self::StructuralMismatch => VALUE_ERROR_DESCRIPTION,
        }
    }
}

/// One error row produced during materialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaIssue {
    /// Key path from the document root, `/`-separated.
    pub path: String,
    pub kind: IssueKind,
}

/// A freshly built document tree and the error rows it contains.
#[derive(Debug)]
pub struct Materialized {
    pub tree: Tree,
    pub issues: Vec<SchemaIssue>,
}

/// Builds tree rows from a document and collects the schema issues found on
/// the way.
#[derive(Debug, Default)]
pub struct Materializer {
    path: Vec<String>,
    issues: Vec<SchemaIssue>,
}

impl Materializer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues recorded so far.
    #[must_use]
    pub fn issues(&self) -> &[SchemaIssue] {
        &self.issues
    }

    #[must_use]
    pub fn into_issues(self) -> Vec<SchemaIssue> {
        self.issues
    }

    /// Append one row per key of `document` under the root of `target`.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Tree`] when `target` does not have the five document
    /// columns.
    pub fn fill(
        &mut self,
        document: &Map<String, Value>,
        metadata: &MetadataMap,
        target: &mut Tree,
    ) -> Result<(), ConvertError> {
        let parent = target.root();
        for (key, value) in document {
            self.path.push(key.clone());
            let result = self.add_entry(target, parent, key, value, metadata.get(key));
            self.path.pop();
            result?;
        }
        Ok(())
    }

    fn add_entry(
        &mut self,
        tree: &mut Tree,
        parent: NodeId,
        key: &str,
        value: &Value,
        entry: Option<&MetaEntry>,
    ) -> Result<(), ConvertError> {
        match (entry, value) {
            (None, _) => self.add_error(tree, parent, key, value, IssueKind::KeyMissing),
            (Some(MetaEntry::Object(nested)), Value::Object(object)) => {
                self.add_object(tree, parent, Record::container(key).into_row(), object, nested)
            }
            (Some(MetaEntry::Field(field)), value) if !value.is_object() => {
                add_field(tree, parent, key, value, field)
            }
            (Some(_), _) => {
                self.add_error(tree, parent, key, value, IssueKind::StructuralMismatch)
            }
        }
    }

    fn add_object(
        &mut self,
        tree: &mut Tree,
        parent: NodeId,
        row: Row,
        object: &Map<String, Value>,
        metadata: &MetadataMap,
    ) -> Result<(), ConvertError> {
        let container = tree.add_node(parent, row, None)?;
        let mut part = Tree::new(header_of(tree));
        self.fill(object, metadata, &mut part)?;
        tree.graft(container, part)?;
        Ok(())
    }

    fn add_error(
        &mut self,
        tree: &mut Tree,
        parent: NodeId,
        key: &str,
        value: &Value,
        kind: IssueKind,
    ) -> Result<(), ConvertError> {
        let path = self.path.join("/");
        tracing::warn!(
            key = %path,
            marker = kind.title(),
            "document does not match the schema, substituting an error row"
        );
        self.issues.push(SchemaIssue { path, kind });

        if let Value::Object(object) = value {
            let row = Record::leaf(
                key,
                kind.title(),
                Cell::Empty,
                ValueType::Object.as_str(),
                kind.description(),
            )
            .into_row();
            self.add_object(tree, parent, row, object, &MetadataMap::default())
        } else {
            let row = Record::leaf(
                key,
                kind.title(),
                display_text(value),
                ValueType::String.as_str(),
                kind.description(),
            )
            .into_row();
            tree.add_node(parent, row, None)?;
            Ok(())
        }
    }
}

fn header_of(tree: &Tree) -> Row {
    tree.node(tree.root())
        .map(|root| root.row().to_vec())
        .unwrap_or_else(Column::header_row)
}

fn add_field(
    tree: &mut Tree,
    parent: NodeId,
    key: &str,
    value: &Value,
    field: &FieldMeta,
) -> Result<(), ConvertError> {
    let row = Record::leaf(
        key,
        field.title.as_str(),
        display_text(value),
        field.type_tag.as_str(),
        field.description.as_str(),
    )
    .into_row();
    let node = tree.add_node(parent, row, Some(field.fragment.clone()))?;

    if let Value::Array(items) = value {
        for item in items {
            let type_tag = if item.is_object() {
                ValueType::Object
            } else {
                ValueType::String
            };
            let row = Record::leaf(
                "",
                "",
                display_text(item),
                type_tag.as_str(),
                ARRAY_ITEM_DESCRIPTION,
            )
            .into_row();
            tree.add_node(node, row, None)?;
        }
    }
    Ok(())
}

/// Append the rows of `document` under the root of `target`.
///
/// Never fails on schema mismatches; those become error rows and are
/// returned as issues.
///
/// # Errors
///
/// [`ConvertError::Tree`] when `target` does not have the five document
/// columns.
pub fn materialize(
    document: &Map<String, Value>,
    metadata: &MetadataMap,
    target: &mut Tree,
) -> Result<Vec<SchemaIssue>, ConvertError> {
    let mut materializer = Materializer::new();
    materializer.fill(document, metadata, target)?;
    let issues = materializer.into_issues();
    tracing::debug!(rows = target.len() - 1, issues = issues.len(), "document materialized");
    Ok(issues)
}

/// Build a new five-column tree from a whole document.
///
/// # Errors
///
/// [`ConvertError::NotAnObject`] when the document's top level is not an
/// object.
pub fn materialize_document(
    document: &Value,
    metadata: &MetadataMap,
) -> Result<Materialized, ConvertError> {
    let object = document.as_object().ok_or(ConvertError::NotAnObject)?;
    let mut tree = Tree::document();
    let issues = materialize(object, metadata, &mut tree)?;
    Ok(Materialized { tree, issues })
}
