//! Banned-ID bitset derived from tree queries.

use std::collections::HashSet;

use fixedbitset::FixedBitSet;
use tracing::instrument;

use crate::errors::{TreeError, TreeResult};
use crate::registry::NodeId;
use crate::tree::Tree;

/// Point-in-time membership test answering "is this ID banned?".
///
/// A `Blacklister` is derived from the tree once and is independent of it
/// afterward; it does not track later mutations and must be rebuilt if the
/// tree changes.
#[derive(Debug, Clone)]
pub struct Blacklister {
    store: FixedBitSet,
}

impl Blacklister {
    /// Whether `id` is banned. O(1). An ID beyond the bitset capacity is
    /// not banned rather than an error.
    pub fn is(&self, id: NodeId) -> bool {
        usize::try_from(id).map_or(false, |bit| self.store.contains(bit))
    }

    /// Read-only view of the underlying bitset, for further set algebra
    /// (union or intersection with other banned sets).
    pub fn storage(&self) -> &FixedBitSet {
        &self.store
    }

    /// Bit capacity of the snapshot: the tree's max observed ID at
    /// derivation time, plus one.
    pub fn capacity(&self) -> usize {
        self.store.len()
    }
}

impl Tree {
    /// Derive a [`Blacklister`] from explicit blacklist and whitelist sets.
    ///
    /// A non-empty whitelist bans every node outside the whitelisted
    /// subtrees. Each blacklist entry bans itself and, unless it equals the
    /// configured ignore ID, its entire subtree; banning the ignore
    /// sentinel alone skips the descendant expansion.
    ///
    /// Every step takes its own read lock, so the snapshot can tear if
    /// `add` runs concurrently. Derive only on a quiescent tree.
    #[instrument(level = "debug", skip(self))]
    pub fn get_blacklister(
        &self,
        blacklist: &[NodeId],
        whitelist: &[NodeId],
    ) -> TreeResult<Blacklister> {
        let mut banned: HashSet<NodeId> = HashSet::new();

        if !whitelist.is_empty() {
            banned.extend(self.exclude(whitelist)?);
        }

        for &entry in blacklist {
            banned.insert(entry);
            if self.ignore_id() == Some(entry) {
                continue;
            }
            banned.extend(self.get_descendants(entry)?);
        }

        let capacity = self.max_id() as usize + 1;
        let mut store = FixedBitSet::with_capacity(capacity);
        for id in banned {
            match usize::try_from(id) {
                Ok(bit) if bit < capacity => store.insert(bit),
                _ => return Err(TreeError::BitsetOutOfRange { id, capacity }),
            }
        }
        Ok(Blacklister { store })
    }
}
