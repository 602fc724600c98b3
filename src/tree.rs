//! The category tree: pair ingestion and hierarchy queries.

use std::collections::HashSet;

use parking_lot::RwLock;
use tracing::instrument;

use crate::config::TreeOptions;
use crate::errors::{TreeError, TreeResult};
use crate::registry::{NodeId, Registry};
use crate::source::NodeSource;

/// Owned snapshot of one node's links, safe to hold after the internal
/// lock has been released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

#[derive(Debug)]
struct TreeInner {
    registry: Registry,
    /// Largest ID seen in any ingested pair, root included. Monotonically
    /// non-decreasing; sizes derived bitsets.
    max_id: NodeId,
}

/// Hierarchical category index built from `(current, parent)` pairs.
///
/// The tree is normally bulk-loaded once via [`Tree::build`] and queried
/// repeatedly afterward. Incremental [`add`](Tree::add) calls take the
/// internal write lock; queries take the read lock and may run
/// concurrently with each other but not with `add`. All operations are
/// synchronous, with explicit-stack traversals bounded by tree shape.
#[derive(Debug)]
pub struct Tree {
    inner: RwLock<TreeInner>,
    root_id: NodeId,
    ignore_id: Option<NodeId>,
}

impl Tree {
    /// Build a tree by draining `source`.
    ///
    /// The root node is created under `options.root_id` before any pair is
    /// ingested. Source failures abort the build.
    #[instrument(level = "debug", skip(source))]
    pub fn build<S: NodeSource>(mut source: S, options: TreeOptions) -> TreeResult<Self> {
        let mut registry = Registry::new();
        registry.ensure(options.root_id);

        let tree = Self {
            inner: RwLock::new(TreeInner {
                registry,
                max_id: options.root_id,
            }),
            root_id: options.root_id,
            ignore_id: options.ignore_id,
        };

        while source.advance() {
            let (current, parent) = source.get()?;
            tree.add(current, parent);
        }
        Ok(tree)
    }

    /// Ingest one `(current, parent)` pair under the write lock.
    ///
    /// Pairs whose current ID equals the configured ignore ID are dropped
    /// entirely. An unknown parent is created on the fly and parked under
    /// the root until its own pair arrives, so children may be streamed
    /// before their parents. Re-assigning a known ID to a new parent
    /// detaches it from the previous one.
    #[instrument(level = "trace", skip(self))]
    pub fn add(&self, current: NodeId, parent: NodeId) {
        if Some(current) == self.ignore_id {
            return;
        }
        let mut inner = self.inner.write();

        let child_idx = inner.registry.ensure(current);
        let parent_idx = match inner.registry.lookup(parent) {
            Some(idx) => idx,
            None => {
                let idx = inner.registry.ensure(parent);
                let root_idx = inner.registry.ensure(self.root_id);
                inner.registry.attach(idx, root_idx);
                idx
            }
        };

        inner.max_id = inner.max_id.max(current).max(parent);
        inner.registry.attach(child_idx, parent_idx);
    }

    /// O(1) snapshot of one node.
    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, id: NodeId) -> TreeResult<NodeInfo> {
        let inner = self.inner.read();
        let idx = inner
            .registry
            .lookup(id)
            .ok_or(TreeError::NodeNotFound(id))?;
        let node = inner
            .registry
            .node(idx)
            .ok_or(TreeError::NodeNotFound(id))?;
        let parent = node
            .parent
            .and_then(|p| inner.registry.node(p))
            .map(|p| p.id);
        let children = node
            .children
            .iter()
            .filter_map(|&c| inner.registry.node(c))
            .map(|c| c.id)
            .collect();
        Ok(NodeInfo {
            id: node.id,
            parent,
            children,
        })
    }

    /// IDs on the path from `id`'s parent up to the root: immediate parent
    /// first, root last. O(depth).
    #[instrument(level = "trace", skip(self))]
    pub fn get_ancestors(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        let inner = self.inner.read();
        let idx = inner
            .registry
            .lookup(id)
            .ok_or(TreeError::NodeNotFound(id))?;
        Ok(inner.registry.ancestors(idx).collect())
    }

    /// Pre-order depth-first enumeration of `id`'s subtree, `id` itself
    /// excluded, children in insertion order. O(subtree size).
    #[instrument(level = "trace", skip(self))]
    pub fn get_descendants(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        let inner = self.inner.read();
        let idx = inner
            .registry
            .lookup(id)
            .ok_or(TreeError::NodeNotFound(id))?;
        Ok(inner.registry.descendants(idx).collect())
    }

    /// Full pre-order walk from the root with the subtrees rooted at `ids`
    /// pruned whole. IDs absent from the tree are inert. O(tree size).
    ///
    /// Excluding the root is refused: that would exclude the entire tree.
    #[instrument(level = "trace", skip(self))]
    pub fn exclude(&self, ids: &[NodeId]) -> TreeResult<Vec<NodeId>> {
        if ids.contains(&self.root_id) {
            return Err(TreeError::RootExcluded(self.root_id));
        }
        let skip: HashSet<NodeId> = ids.iter().copied().collect();

        let inner = self.inner.read();
        let root_idx = inner
            .registry
            .lookup(self.root_id)
            .ok_or(TreeError::NodeNotFound(self.root_id))?;

        let mut out = Vec::new();
        let mut stack = Vec::new();
        if let Some(root) = inner.registry.node(root_idx) {
            for &child in root.children.iter().rev() {
                stack.push(child);
            }
        }
        while let Some(idx) = stack.pop() {
            if let Some(node) = inner.registry.node(idx) {
                if skip.contains(&node.id) {
                    // Prune the whole subtree, not just the node
                    continue;
                }
                out.push(node.id);
                for &child in node.children.iter().rev() {
                    stack.push(child);
                }
            }
        }
        Ok(out)
    }

    /// Sibling retrieval. Deliberate stub: always fails.
    pub fn get_siblings(&self, _id: NodeId) -> TreeResult<Vec<NodeId>> {
        Err(TreeError::NotImplemented("sibling lookup"))
    }

    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    pub fn ignore_id(&self) -> Option<NodeId> {
        self.ignore_id
    }

    /// Largest ID observed so far, always ≥ every registered ID.
    pub fn max_id(&self) -> NodeId {
        self.inner.read().max_id
    }

    /// Number of registered nodes, root included.
    pub fn len(&self) -> usize {
        self.inner.read().registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` against the registry under the read lock.
    pub(crate) fn with_registry<R>(&self, f: impl FnOnce(&Registry) -> R) -> R {
        f(&self.inner.read().registry)
    }
}
