use arbor_core::CoercionError;
use thiserror::Error;

use crate::node::NodeId;

/// Errors from tree operations that do more than report a bounds failure.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The id does not name a live node of this tree.
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    /// A row does not match the tree's column count.
    #[error("row has {actual} cells but the tree has {expected} columns")]
    RowWidth { expected: usize, actual: usize },

    /// An edit was rejected by the row's declared type.
    #[error("cannot set '{key}': {source}")]
    Coercion {
        key: String,
        #[source]
        source: CoercionError,
    },

    /// The node's value is rebuilt from its children and cannot be edited
    /// directly.
    #[error("'{key}' has {children} child rows; edit those instead")]
    HasChildren { key: String, children: usize },

    /// The column index lies outside the node's row.
    #[error("column {0} is outside the row")]
    ColumnOutOfRange(usize),
}
