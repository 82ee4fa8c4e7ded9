//! Change notifications.
//!
//! Structural events come in `Begin*`/`End*` pairs around the mutation; a view
//! that observes the tree never sees a half-applied change between them.

use std::sync::mpsc::Sender;

use crate::node::NodeId;

/// A change to the tree, as seen by observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    BeginInsertRows {
        parent: NodeId,
        first: usize,
        last: usize,
    },
    EndInsertRows,
    BeginRemoveRows {
        parent: NodeId,
        first: usize,
        last: usize,
    },
    EndRemoveRows,
    BeginInsertColumns {
        first: usize,
        last: usize,
    },
    EndInsertColumns,
    BeginRemoveColumns {
        first: usize,
        last: usize,
    },
    EndRemoveColumns,
    DataChanged {
        node: NodeId,
        column: usize,
    },
}

/// Receiver of tree change events.
pub trait ChangeSink {
    fn notify(&mut self, event: &TreeEvent);
}

impl ChangeSink for Sender<TreeEvent> {
    fn notify(&mut self, event: &TreeEvent) {
        // A dropped receiver just means nobody is watching anymore.
        let _ = self.send(event.clone());
    }
}
