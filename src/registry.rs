use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::instrument;

/// Identifier of a category node.
///
/// One reserved value (the configured root ID, `0` by default) names the
/// synthetic root and doubles as the "top level" marker in incoming pairs.
pub type NodeId = u64;

/// One category in the hierarchy.
#[derive(Debug)]
pub struct Node {
    /// External identifier of this category
    pub id: NodeId,
    /// Arena index of the parent node, None for the root
    pub parent: Option<Index>,
    /// Arena indices of child nodes, in the order they were attached
    pub children: Vec<Index>,
}

/// Arena-backed owner of every [`Node`] in one hierarchy.
///
/// The registry is the single source of truth: nodes cross-reference each
/// other through arena indices resolved here, never through shared pointers.
/// Lookups by external ID and by index are both O(1).
#[derive(Debug)]
pub struct Registry {
    /// Arena storage for all nodes
    arena: Arena<Node>,
    /// External ID to arena index
    by_id: HashMap<NodeId, Index>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            by_id: HashMap::new(),
        }
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Arena index of `id`, if registered.
    #[instrument(level = "trace", skip(self))]
    pub fn lookup(&self, id: NodeId) -> Option<Index> {
        self.by_id.get(&id).copied()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn node(&self, idx: Index) -> Option<&Node> {
        self.arena.get(idx)
    }

    /// Index for `id`, inserting a bare unlinked node if it is new.
    #[instrument(level = "trace", skip(self))]
    pub fn ensure(&mut self, id: NodeId) -> Index {
        if let Some(idx) = self.lookup(id) {
            return idx;
        }
        let idx = self.arena.insert(Node {
            id,
            parent: None,
            children: Vec::new(),
        });
        self.by_id.insert(id, idx);
        idx
    }

    /// Attach `child` under `parent`, detaching it from any previous parent.
    ///
    /// Re-attaching under the current parent is a no-op, so a node never
    /// appears twice in one child list and never under two parents at once.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(&mut self, child: Index, parent: Index) {
        let prev = self.arena.get(child).and_then(|n| n.parent);
        if prev == Some(parent) {
            return;
        }
        if let Some(prev_idx) = prev {
            if let Some(prev_node) = self.arena.get_mut(prev_idx) {
                prev_node.children.retain(|&c| c != child);
            }
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Walk from `idx`'s parent up to the root: immediate parent first,
    /// root last. The walk is O(depth) and assumes acyclic links.
    #[instrument(level = "trace", skip(self))]
    pub fn ancestors(&self, idx: Index) -> Ancestors<'_> {
        Ancestors {
            registry: self,
            cursor: Some(idx),
        }
    }

    /// Pre-order depth-first walk of `idx`'s subtree, `idx` itself
    /// excluded. Children are visited in insertion order.
    #[instrument(level = "trace", skip(self))]
    pub fn descendants(&self, idx: Index) -> Descendants<'_> {
        Descendants::new(self, idx)
    }
}

pub struct Ancestors<'a> {
    registry: &'a Registry,
    cursor: Option<Index>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let parent_idx = self.registry.node(self.cursor?)?.parent?;
        let parent = self.registry.node(parent_idx)?;
        self.cursor = Some(parent_idx);
        Some(parent.id)
    }
}

pub struct Descendants<'a> {
    registry: &'a Registry,
    stack: Vec<Index>,
}

impl<'a> Descendants<'a> {
    fn new(registry: &'a Registry, start: Index) -> Self {
        let mut stack = Vec::new();
        if let Some(node) = registry.node(start) {
            // Push children in reverse order for left-to-right traversal
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
        Self { registry, stack }
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.stack.pop() {
            if let Some(node) = self.registry.node(idx) {
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some(node.id);
            }
        }
        None
    }
}
