//! Hierarchy rendering as an ASCII tree.

use generational_arena::Index;
use termtree::Tree as TextTree;
use tracing::instrument;

use crate::registry::Registry;
use crate::tree::Tree;

pub trait TreeRender {
    fn to_tree_string(&self) -> TextTree<String>;
}

impl TreeRender for Tree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> TextTree<String> {
        self.with_registry(|registry| {
            if let Some(root_idx) = registry.lookup(self.root_id()) {
                render(registry, root_idx)
            } else {
                TextTree::new("empty tree".to_string())
            }
        })
    }
}

fn render(registry: &Registry, idx: Index) -> TextTree<String> {
    match registry.node(idx) {
        Some(node) => {
            let leaves: Vec<_> = node
                .children
                .iter()
                .map(|&child| render(registry, child))
                .collect();
            TextTree::new(node.id.to_string()).with_leaves(leaves)
        }
        None => TextTree::new("?".to_string()),
    }
}
