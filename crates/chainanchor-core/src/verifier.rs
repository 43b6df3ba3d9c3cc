//! Block verification against hardcoded checkpoints.
//!
//! A height without a checkpoint is unconstrained. A checkpointed height
//! accepts exactly one hash; any other hash is a consensus violation and
//! the candidate chain must be rejected.

use crate::error::AnchorError;
use crate::registry::CheckpointRegistry;
use crate::types::BlockHash;

/// Returns `false` only if `height` is checkpointed, enforcement is
/// `enabled`, and `hash` differs from the registered value.
pub fn check_block(
    registry: &CheckpointRegistry,
    height: u64,
    hash: &BlockHash,
    enabled: bool,
) -> bool {
    if !enabled {
        return true;
    }
    match registry.get(height) {
        Some(expected) => expected == hash,
        None => true,
    }
}

/// Like [`check_block`], but reports a mismatch as
/// [`AnchorError::CheckpointMismatch`].
pub fn verify_block(
    registry: &CheckpointRegistry,
    height: u64,
    hash: &BlockHash,
    enabled: bool,
) -> Result<(), AnchorError> {
    if check_block(registry, height, hash, enabled) {
        return Ok(());
    }
    // check_block only fails at a registered height
    let expected = registry.get(height).copied().unwrap_or(BlockHash::ZERO);
    tracing::warn!(
        height,
        expected = %expected,
        actual = %hash,
        network = %registry.network(),
        "Block does not match hardcoded checkpoint"
    );
    Err(AnchorError::CheckpointMismatch {
        height,
        expected,
        actual: *hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::select_registry;
    use crate::types::Network;

    fn genesis() -> BlockHash {
        "d58888d61baa00c7acd6388356e449ca5d54beacab38361fd48cad0012959a2d"
            .parse()
            .unwrap()
    }

    #[test]
    fn accepts_registered_hash() {
        let reg = select_registry(Network::Main);
        assert!(check_block(reg, 0, &genesis(), true));
        assert!(verify_block(reg, 0, &genesis(), true).is_ok());
    }

    #[test]
    fn rejects_wrong_hash_at_checkpoint() {
        let reg = select_registry(Network::Main);
        let forged = BlockHash::new([0x11; 32]);
        assert!(!check_block(reg, 0, &forged, true));

        let err = verify_block(reg, 0, &forged, true).unwrap_err();
        assert!(err.is_fatal());
        match err {
            AnchorError::CheckpointMismatch { height, expected, actual } => {
                assert_eq!(height, 0);
                assert_eq!(expected, genesis());
                assert_eq!(actual, forged);
            }
            other => panic!("expected CheckpointMismatch, got {other:?}"),
        }
    }

    #[test]
    fn unconstrained_height_accepts_anything() {
        let reg = select_registry(Network::Main);
        assert!(check_block(reg, 3, &BlockHash::ZERO, true));
        assert!(check_block(reg, 61_713, &BlockHash::new([0xff; 32]), true));
    }

    #[test]
    fn disabled_accepts_everything() {
        let reg = select_registry(Network::Main);
        let forged = BlockHash::new([0x11; 32]);
        assert!(check_block(reg, 0, &forged, false));
        assert!(verify_block(reg, 16, &forged, false).is_ok());
    }

    #[test]
    fn tables_are_network_specific() {
        // Mainnet genesis is not a testnet checkpoint, and vice versa.
        let test = select_registry(Network::Test);
        assert!(check_block(test, 0, &BlockHash::ZERO, true));
        let test_hash = *test.get(546).unwrap();
        assert!(check_block(select_registry(Network::Main), 546, &test_hash, true));
        assert!(!check_block(test, 546, &genesis(), true));
    }
}
