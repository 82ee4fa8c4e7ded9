//! # arbor-tree
//!
//! The tree-of-records that backs the interactive document view.
//!
//! Nodes live in an arena owned by [`Tree`] and are addressed by [`NodeId`].
//! Each node owns an ordered list of child ids and holds a non-owning
//! back-reference to its parent. Removing a child drops its whole subtree.
//! Ids are never reused, so a stale id simply resolves to `None`. Slots of
//! removed nodes are not reclaimed either: the arena grows with every node
//! ever added and is freed only when the tree is dropped.
//!
//! Structural changes are bracketed by begin/end [`TreeEvent`]s and value
//! changes emit a single `DataChanged` event, delivered to every subscribed
//! [`ChangeSink`].

mod error;
mod events;
mod node;
mod tree;

pub use error::TreeError;
pub use events::{ChangeSink, TreeEvent};
pub use node::{Node, NodeId};
pub use tree::Tree;
