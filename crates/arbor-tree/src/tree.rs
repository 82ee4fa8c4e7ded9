use std::fmt;

use arbor_core::{Cell, Column, Row, ValueType, validate_text};
use serde_json::{Map, Value};

use crate::error::TreeError;
use crate::events::{ChangeSink, TreeEvent};
use crate::node::{Node, NodeId};

/// Owner of the root node and of every node below it.
///
/// The root row holds the header labels; its width is the column count that
/// every node in the tree shares.
pub struct Tree {
    nodes: Vec<Option<Node>>,
    root: NodeId,
    sinks: Vec<Box<dyn ChangeSink>>,
}

impl Tree {
    /// A tree whose header row (and therefore column count) is `header`.
    #[must_use]
    pub fn new(header: Row) -> Self {
        Self {
            nodes: vec![Some(Node::new(header, None))],
            root: NodeId(0),
            sinks: Vec::new(),
        }
    }

    /// A tree with the five document columns.
    #[must_use]
    pub fn document() -> Self {
        Self::new(Column::header_row())
    }

    /// Register an observer for change events.
    pub fn subscribe(&mut self, sink: impl ChangeSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    fn emit(&mut self, event: &TreeEvent) {
        for sink in &mut self.sinks {
            sink.notify(event);
        }
    }

    // -- navigation ---------------------------------------------------------

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Column count declared by the root row.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.node(self.root).map_or(0, Node::width)
    }

    /// Header label of `column`.
    #[must_use]
    pub fn header(&self, column: usize) -> Option<&Cell> {
        self.node(self.root).and_then(|root| root.value(column))
    }

    /// Children of `id`; empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], Node::children)
    }

    #[must_use]
    pub fn child(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.children(parent).get(index).copied()
    }

    #[must_use]
    pub fn last_child(&self, parent: NodeId) -> Option<NodeId> {
        self.children(parent).last().copied()
    }

    #[must_use]
    pub fn child_count(&self, parent: NodeId) -> usize {
        self.children(parent).len()
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// Position of `id` among its siblings; 0 for the root.
    #[must_use]
    pub fn row_of(&self, id: NodeId) -> usize {
        self.parent(id)
            .and_then(|parent| self.children(parent).iter().position(|c| *c == id))
            .unwrap_or(0)
    }

    /// Cell of `id` at `column`; `None` for unknown nodes or columns.
    #[must_use]
    pub fn value(&self, id: NodeId, column: usize) -> Option<&Cell> {
        self.node(id).and_then(|node| node.value(column))
    }

    /// Number of live nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    /// True when the root has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.child_count(self.root) == 0
    }

    /// `id` followed by all of its descendants, depth first.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if self.node(next).is_none() {
                continue;
            }
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Follow key cells from the root.
    ///
    /// A segment that matches no key but parses as a number selects the child
    /// at that position, which reaches keyless array items.
    #[must_use]
    pub fn find_path(&self, path: &[&str]) -> Option<NodeId> {
        let mut current = self.root;
        for segment in path {
            let by_key = self.children(current).iter().copied().find(|child| {
                self.value(*child, Column::Key.index())
                    .is_some_and(|key| key.as_text() == *segment)
            });
            current = match by_key {
                Some(found) => found,
                None => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.child(current, index))?,
            };
        }
        Some(current)
    }

    // -- node-level structure -----------------------------------------------

    fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.push(Some(node));
        NodeId(self.nodes.len() - 1)
    }

    fn release(&mut self, id: NodeId) {
        for descendant in self.descendants(id) {
            if let Some(slot) = self.nodes.get_mut(descendant.0) {
                *slot = None;
            }
        }
    }

    /// Insert `count` children with blank rows of `columns` cells at `position`.
    ///
    /// Fails without mutation when `position` is beyond the child count or
    /// `parent` is unknown.
    pub fn insert_children(
        &mut self,
        parent: NodeId,
        position: usize,
        count: usize,
        columns: usize,
    ) -> bool {
        if position > self.child_count(parent) || self.node(parent).is_none() {
            return false;
        }
        let fresh: Vec<NodeId> = (0..count)
            .map(|_| self.alloc(Node::new(vec![Cell::Empty; columns], Some(parent))))
            .collect();
        if let Some(node) = self.node_mut(parent) {
            node.children.splice(position..position, fresh);
        }
        true
    }

    /// Remove `count` children starting at `position`, dropping their subtrees.
    ///
    /// All-or-nothing: fails without mutation when the range is not fully
    /// inside the child list.
    pub fn remove_children(&mut self, parent: NodeId, position: usize, count: usize) -> bool {
        let in_range = position
            .checked_add(count)
            .is_some_and(|end| end <= self.child_count(parent));
        if !in_range || self.node(parent).is_none() {
            return false;
        }
        let removed: Vec<NodeId> = match self.node_mut(parent) {
            Some(node) => node.children.drain(position..position + count).collect(),
            None => return false,
        };
        for id in removed {
            self.release(id);
        }
        true
    }

    /// Insert `count` blank cells at `position` in `id` and every descendant.
    ///
    /// Only uniform when applied to the root; see [`Tree::insert_columns`].
    fn insert_node_columns(&mut self, id: NodeId, position: usize, count: usize) -> bool {
        match self.node(id) {
            Some(node) if position <= node.width() => {}
            _ => return false,
        }
        for target in self.descendants(id) {
            if let Some(node) = self.node_mut(target) {
                node.insert_cells(position, count);
            }
        }
        true
    }

    /// Remove `count` cells at `position` from `id` and every descendant.
    ///
    /// Only uniform when applied to the root; see [`Tree::remove_columns`].
    fn remove_node_columns(&mut self, id: NodeId, position: usize, count: usize) -> bool {
        let in_range = match self.node(id) {
            Some(node) => position
                .checked_add(count)
                .is_some_and(|end| end <= node.width()),
            None => false,
        };
        if !in_range {
            return false;
        }
        for target in self.descendants(id) {
            if let Some(node) = self.node_mut(target) {
                node.remove_cells(position, count);
            }
        }
        true
    }

    // -- model-level structure (notifying) ----------------------------------

    /// Append a node with `row` under `parent`.
    ///
    /// # Errors
    ///
    /// [`TreeError::UnknownNode`] for a dead parent and [`TreeError::RowWidth`]
    /// when `row` does not have exactly [`Tree::column_count`] cells.
    pub fn add_node(
        &mut self,
        parent: NodeId,
        row: Row,
        metadata: Option<Map<String, Value>>,
    ) -> Result<NodeId, TreeError> {
        if self.node(parent).is_none() {
            return Err(TreeError::UnknownNode(parent));
        }
        let expected = self.column_count();
        if row.len() != expected {
            return Err(TreeError::RowWidth {
                expected,
                actual: row.len(),
            });
        }

        let position = self.child_count(parent);
        self.emit(&TreeEvent::BeginInsertRows {
            parent,
            first: position,
            last: position,
        });
        let mut node = Node::new(row, Some(parent));
        node.metadata = metadata.unwrap_or_default();
        let id = self.alloc(node);
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.push(id);
        }
        self.emit(&TreeEvent::EndInsertRows);
        Ok(id)
    }

    /// Insert `count` blank rows under `parent` at `position`.
    pub fn insert_rows(&mut self, parent: NodeId, position: usize, count: usize) -> bool {
        if position > self.child_count(parent) || self.node(parent).is_none() {
            return false;
        }
        if count == 0 {
            return true;
        }
        self.emit(&TreeEvent::BeginInsertRows {
            parent,
            first: position,
            last: position + count - 1,
        });
        let columns = self.column_count();
        let success = self.insert_children(parent, position, count, columns);
        self.emit(&TreeEvent::EndInsertRows);
        success
    }

    /// Remove `count` rows under `parent` starting at `position`.
    pub fn remove_rows(&mut self, parent: NodeId, position: usize, count: usize) -> bool {
        let in_range = position
            .checked_add(count)
            .is_some_and(|end| end <= self.child_count(parent));
        if !in_range || self.node(parent).is_none() {
            return false;
        }
        if count == 0 {
            return true;
        }
        self.emit(&TreeEvent::BeginRemoveRows {
            parent,
            first: position,
            last: position + count - 1,
        });
        let success = self.remove_children(parent, position, count);
        self.emit(&TreeEvent::EndRemoveRows);
        success
    }

    /// Insert `count` columns at `position` across the whole tree.
    pub fn insert_columns(&mut self, position: usize, count: usize) -> bool {
        if position > self.column_count() {
            return false;
        }
        if count == 0 {
            return true;
        }
        self.emit(&TreeEvent::BeginInsertColumns {
            first: position,
            last: position + count - 1,
        });
        let success = self.insert_node_columns(self.root, position, count);
        self.emit(&TreeEvent::EndInsertColumns);
        success
    }

    /// Remove `count` columns at `position` across the whole tree.
    ///
    /// When no column is left, every top-level row is removed as well.
    pub fn remove_columns(&mut self, position: usize, count: usize) -> bool {
        let in_range = position
            .checked_add(count)
            .is_some_and(|end| end <= self.column_count());
        if !in_range {
            return false;
        }
        if count == 0 {
            return true;
        }
        self.emit(&TreeEvent::BeginRemoveColumns {
            first: position,
            last: position + count - 1,
        });
        let success = self.remove_node_columns(self.root, position, count);
        self.emit(&TreeEvent::EndRemoveColumns);

        if self.column_count() == 0 {
            let rows = self.child_count(self.root);
            self.remove_rows(self.root, 0, rows);
        }
        success
    }

    /// Move every top-level node of `subtree` under `parent`, in order.
    ///
    /// The moved nodes get fresh ids in this tree and `parent` as their
    /// back-reference. Observers see one insert bracket around the whole move.
    /// Returns the new ids of the moved top-level nodes.
    ///
    /// # Errors
    ///
    /// [`TreeError::UnknownNode`] for a dead parent and [`TreeError::RowWidth`]
    /// when the two trees disagree on the column count.
    pub fn graft(&mut self, parent: NodeId, mut subtree: Self) -> Result<Vec<NodeId>, TreeError> {
        if self.node(parent).is_none() {
            return Err(TreeError::UnknownNode(parent));
        }
        if subtree.column_count() != self.column_count() {
            return Err(TreeError::RowWidth {
                expected: self.column_count(),
                actual: subtree.column_count(),
            });
        }
        let incoming = subtree.children(subtree.root).to_vec();
        if incoming.is_empty() {
            return Ok(Vec::new());
        }

        let first = self.child_count(parent);
        self.emit(&TreeEvent::BeginInsertRows {
            parent,
            first,
            last: first + incoming.len() - 1,
        });
        let moved: Vec<NodeId> = incoming
            .into_iter()
            .filter_map(|id| self.adopt(&mut subtree, id, parent))
            .collect();
        if let Some(node) = self.node_mut(parent) {
            node.children.extend(moved.iter().copied());
        }
        self.emit(&TreeEvent::EndInsertRows);
        Ok(moved)
    }

    fn adopt(&mut self, source: &mut Self, id: NodeId, parent: NodeId) -> Option<NodeId> {
        let mut node = source.nodes.get_mut(id.0).and_then(Option::take)?;
        let old_children = std::mem::take(&mut node.children);
        node.parent = Some(parent);
        let new_id = self.alloc(node);
        let new_children: Vec<NodeId> = old_children
            .into_iter()
            .filter_map(|child| self.adopt(source, child, new_id))
            .collect();
        if let Some(adopted) = self.node_mut(new_id) {
            adopted.children = new_children;
        }
        Some(new_id)
    }

    // -- values -------------------------------------------------------------

    /// Replace one cell of `id` in place and notify observers.
    ///
    /// Fails without mutation for unknown nodes and out-of-range columns.
    pub fn set_value(&mut self, id: NodeId, column: usize, value: Cell) -> bool {
        let changed = self
            .node_mut(id)
            .is_some_and(|node| node.set_value(column, value));
        if changed {
            self.emit(&TreeEvent::DataChanged { node: id, column });
        }
        changed
    }

    /// Set the value column of `id` from edited text, after checking it
    /// against the row's type tag.
    ///
    /// Empty text bypasses the type check.
    ///
    /// # Errors
    ///
    /// [`TreeError::HasChildren`] for container and array rows with item
    /// rows, whose value is rebuilt from the children.
    /// [`TreeError::Coercion`] when the text does not read as the declared
    /// type. The node is left untouched in both cases.
    pub fn edit_value(&mut self, id: NodeId, text: &str) -> Result<(), TreeError> {
        let node = self.node(id).ok_or(TreeError::UnknownNode(id))?;
        let key = node
            .value(Column::Key.index())
            .map(|cell| cell.as_text().into_owned())
            .unwrap_or_default();
        let type_tag = node
            .value(Column::Type.index())
            .map(|cell| cell.as_text().into_owned())
            .unwrap_or_default();

        let children = node.child_count();
        if children > 0 {
            return Err(TreeError::HasChildren { key, children });
        }

        if text.is_empty() {
            tracing::warn!(key = %key, "empty value set, type validation bypassed");
        } else {
            validate_text(text, ValueType::from_tag(&type_tag))
                .map_err(|source| TreeError::Coercion {
                    key: key.clone(),
                    source,
                })?;
        }

        let column = Column::Value.index();
        if !self.set_value(id, column, Cell::from(text)) {
            return Err(TreeError::ColumnOutOfRange(column));
        }
        tracing::info!(key = %key, value = text, "value replaced");
        Ok(())
    }

    // -- metadata -----------------------------------------------------------

    /// Replace the metadata of `id` with a copy of `metadata`.
    pub fn set_metadata(&mut self, id: NodeId, metadata: &Map<String, Value>) -> bool {
        self.node_mut(id).is_some_and(|node| {
            node.metadata = metadata.clone();
            true
        })
    }

    /// Add or overwrite one metadata entry of `id`.
    pub fn insert_metadata(&mut self, id: NodeId, key: impl Into<String>, value: Value) -> bool {
        self.node_mut(id).is_some_and(|node| {
            node.metadata.insert(key.into(), value);
            true
        })
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, indent: usize) -> fmt::Result {
        let Some(node) = self.node(id) else {
            return Ok(());
        };
        write!(f, "{:indent$}<node {id}", "")?;
        for cell in node.row() {
            if cell.is_empty() {
                write!(f, " <None>")?;
            } else {
                write!(f, " \"{cell}\"")?;
            }
        }
        writeln!(f, ", {} children>", node.child_count())?;
        for child in node.children() {
            self.fmt_node(f, *child, indent + 2)?;
        }
        Ok(())
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::document()
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("nodes", &self.len())
            .field("columns", &self.column_count())
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root, 0)
    }
}
