//! Anchor selection: find the most recent checkpoint already held locally.
//!
//! A node that owns (and has validated) a checkpoint block can skip full
//! verification of everything below it.

use std::collections::{BTreeMap, HashMap};

use crate::registry::CheckpointRegistry;
use crate::types::{BlockHash, BlockIndexEntry};

/// Read access to a block index owned by the embedder.
///
/// Consistency while [`last_checkpoint`] scans is the implementor's concern
/// (e.g. hold a read lock for the duration of the call).
pub trait BlockIndex {
    /// Look up a block by hash.
    fn lookup(&self, hash: &BlockHash) -> Option<BlockIndexEntry>;
}

impl BlockIndex for HashMap<BlockHash, BlockIndexEntry> {
    fn lookup(&self, hash: &BlockHash) -> Option<BlockIndexEntry> {
        self.get(hash).copied()
    }
}

impl BlockIndex for BTreeMap<BlockHash, BlockIndexEntry> {
    fn lookup(&self, hash: &BlockHash) -> Option<BlockIndexEntry> {
        self.get(hash).copied()
    }
}

impl<T: BlockIndex + ?Sized> BlockIndex for &T {
    fn lookup(&self, hash: &BlockHash) -> Option<BlockIndexEntry> {
        (**self).lookup(hash)
    }
}

/// The highest checkpoint whose block is present in `index`.
///
/// Returns `None` when enforcement is disabled or no checkpoint is held.
pub fn last_checkpoint<I: BlockIndex + ?Sized>(
    index: &I,
    registry: &CheckpointRegistry,
    enabled: bool,
) -> Option<BlockIndexEntry> {
    if !enabled {
        return None;
    }
    let anchor = registry
        .iter()
        .rev()
        .find_map(|checkpoint| index.lookup(&checkpoint.hash));
    match &anchor {
        Some(entry) => tracing::debug!(
            height = entry.height,
            hash = %entry.hash,
            network = %registry.network(),
            "Selected checkpoint anchor"
        ),
        None => tracing::debug!(network = %registry.network(), "No checkpoint held locally"),
    }
    anchor
}

/// Rough total block count for UI display: the highest checkpoint height,
/// or 0 when enforcement is disabled. Never use this for validation.
pub fn total_blocks_estimate(registry: &CheckpointRegistry, enabled: bool) -> u64 {
    registry.max_checkpoint_height(enabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::select_registry;
    use crate::types::Network;

    fn entry_for(registry: &CheckpointRegistry, height: u64) -> BlockIndexEntry {
        BlockIndexEntry {
            height,
            hash: *registry.get(height).unwrap(),
            timestamp: 1_400_000_000 + height as i64 * 60,
            chain_tx_count: height + 1,
        }
    }

    fn index_of(entries: &[BlockIndexEntry]) -> HashMap<BlockHash, BlockIndexEntry> {
        entries.iter().map(|e| (e.hash, *e)).collect()
    }

    #[test]
    fn empty_index_has_no_anchor() {
        let reg = select_registry(Network::Main);
        let index: HashMap<BlockHash, BlockIndexEntry> = HashMap::new();
        assert!(last_checkpoint(&index, reg, true).is_none());
    }

    #[test]
    fn single_match_is_returned() {
        let reg = select_registry(Network::Main);
        let e = entry_for(reg, 64);
        let index = index_of(&[e]);
        assert_eq!(last_checkpoint(&index, reg, true), Some(e));
    }

    #[test]
    fn highest_match_wins() {
        let reg = select_registry(Network::Main);
        let entries = [entry_for(reg, 0), entry_for(reg, 1024), entry_for(reg, 8)];
        let index = index_of(&entries);
        assert_eq!(last_checkpoint(&index, reg, true).unwrap().height, 1024);
    }

    #[test]
    fn unrelated_blocks_are_ignored() {
        let reg = select_registry(Network::Main);
        let stray = BlockIndexEntry {
            height: 70_000,
            hash: BlockHash::new([0x42; 32]),
            timestamp: 0,
            chain_tx_count: 0,
        };
        let index = index_of(&[stray, entry_for(reg, 2)]);
        assert_eq!(last_checkpoint(&index, reg, true).unwrap().height, 2);
    }

    #[test]
    fn disabled_returns_none() {
        let reg = select_registry(Network::Main);
        let index = index_of(&[entry_for(reg, 61_712)]);
        assert!(last_checkpoint(&index, reg, false).is_none());
    }

    #[test]
    fn btree_index_and_references_work() {
        let reg = select_registry(Network::Test);
        let e = entry_for(reg, 546);
        let index: BTreeMap<BlockHash, BlockIndexEntry> = [(e.hash, e)].into_iter().collect();
        let by_ref: &dyn BlockIndex = &index;
        assert_eq!(last_checkpoint(by_ref, reg, true), Some(e));
        assert_eq!(last_checkpoint(&&index, reg, true), Some(e));
    }

    #[test]
    fn total_blocks_estimate_follows_flag() {
        assert_eq!(total_blocks_estimate(select_registry(Network::Main), true), 61_712);
        assert_eq!(total_blocks_estimate(select_registry(Network::Test), true), 546);
        assert_eq!(total_blocks_estimate(select_registry(Network::Main), false), 0);
    }
}
