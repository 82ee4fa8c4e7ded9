use arbor_core::CoercionError;
use arbor_tree::{NodeId, TreeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// A leaf value does not read as its declared type. The whole flatten
    /// fails; no partial document is produced.
    #[error("value at '{path}' is invalid: {source}")]
    Coercion {
        path: String,
        #[source]
        source: CoercionError,
    },

    /// A node row is narrower than the five document columns.
    #[error("node {0} does not carry a document row")]
    NotARecord(NodeId),

    /// The document's top level is not an object.
    #[error("document top level must be an object")]
    NotAnObject,

    #[error(transparent)]
    Tree(#[from] TreeError),
}
