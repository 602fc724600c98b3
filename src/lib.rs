//! In-memory category tree index.
//!
//! Builds a hierarchy from a single-pass stream of `(id, parent)` pairs and
//! answers ancestor, descendant, exclusion, and blacklist/whitelist queries
//! against it. Intended for catalog and taxonomy workloads: bulk-load once,
//! query repeatedly.
//!
//! ```
//! use catree::{IterSource, Tree, TreeOptions};
//!
//! let pairs = vec![(1, 0), (2, 1), (3, 1)];
//! let tree = Tree::build(IterSource::from(pairs), TreeOptions::default())?;
//!
//! assert_eq!(tree.get_descendants(1)?, vec![2, 3]);
//! assert_eq!(tree.get_ancestors(3)?, vec![1, 0]);
//!
//! let banned = tree.get_blacklister(&[1], &[])?;
//! assert!(banned.is(2));
//! assert!(!banned.is(99));
//! # Ok::<(), catree::TreeError>(())
//! ```

pub mod blacklist;
pub mod config;
pub mod errors;
pub mod registry;
pub mod render;
pub mod source;
pub mod tree;
pub mod util;

pub use blacklist::Blacklister;
pub use config::TreeOptions;
pub use errors::{TreeError, TreeResult};
pub use registry::{Node, NodeId, Registry};
pub use render::TreeRender;
pub use source::{IterSource, NodeSource};
pub use tree::{NodeInfo, Tree};
