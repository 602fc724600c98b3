use thiserror::Error;

use crate::registry::NodeId;

/// Errors produced by tree construction and queries.
///
/// Every variant is deterministic: the same tree state and inputs reproduce
/// the same error, so there is no retry policy.
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("unknown node id: {0}")]
    NodeNotFound(NodeId),

    #[error("cannot exclude the root node (id {0})")]
    RootExcluded(NodeId),

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("banned id {id} exceeds bitset capacity {capacity}")]
    BitsetOutOfRange { id: NodeId, capacity: usize },

    #[error("node source failed: {0}")]
    Source(String),
}

pub type TreeResult<T> = Result<T, TreeError>;
