//! Construction-time tree options.

use serde::{Deserialize, Serialize};

use crate::registry::NodeId;

/// Options consumed by [`Tree::build`](crate::tree::Tree::build).
///
/// `root_id` names the synthetic root node; a pair whose parent equals it
/// marks a top-level category. `ignore_id` names a single ID whose pairs
/// are discarded wholesale during ingestion (absent by default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeOptions {
    /// ID of the synthetic root node
    pub root_id: NodeId,
    /// Pairs whose current ID equals this value are dropped
    pub ignore_id: Option<NodeId>,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            root_id: 0,
            ignore_id: None,
        }
    }
}

impl TreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root_id: NodeId) -> Self {
        self.root_id = root_id;
        self
    }

    pub fn with_ignore(mut self, ignore_id: NodeId) -> Self {
        self.ignore_id = Some(ignore_id);
        self
    }
}
