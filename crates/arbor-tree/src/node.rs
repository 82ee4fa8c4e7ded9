use std::fmt;

use arbor_core::{Cell, Record, Row};
use serde_json::{Map, Value};

/// Handle of a node inside one [`Tree`](crate::Tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single record in the tree.
///
/// The row is positional; for document trees the columns are described by
/// [`arbor_core::Column`]. `metadata` holds the schema fragment that describes
/// this node, or nothing.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub(crate) row: Row,
    pub(crate) metadata: Map<String, Value>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(row: Row, parent: Option<NodeId>) -> Self {
        Self {
            row,
            parent,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn row(&self) -> &[Cell] {
        &self.row
    }

    /// Cell at `column`, or `None` when out of range.
    #[must_use]
    pub fn value(&self, column: usize) -> Option<&Cell> {
        self.row.get(column)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.row.len()
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// `None` only for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// One attribute of the attached schema fragment.
    #[must_use]
    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        let found = self.metadata.get(key);
        if found.is_none() {
            tracing::debug!(key, "no metadata entry");
        }
        found
    }

    /// Typed five-column view of the row.
    #[must_use]
    pub fn record(&self) -> Option<Record> {
        Record::from_row(&self.row)
    }

    /// Replace one cell in place. Out-of-range columns leave the row untouched.
    pub(crate) fn set_value(&mut self, column: usize, value: Cell) -> bool {
        match self.row.get_mut(column) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub(crate) fn insert_cells(&mut self, position: usize, count: usize) -> bool {
        if position > self.row.len() {
            return false;
        }
        self.row
            .splice(position..position, std::iter::repeat_n(Cell::Empty, count));
        true
    }

    pub(crate) fn remove_cells(&mut self, position: usize, count: usize) -> bool {
        match position.checked_add(count) {
            Some(end) if end <= self.row.len() => {
                self.row.drain(position..end);
                true
            }
            _ => false,
        }
    }
}
