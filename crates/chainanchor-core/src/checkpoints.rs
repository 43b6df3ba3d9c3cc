//! The `Checkpoints` facade binds a resolved config to its registry once,
//! then exposes the verification, progress, and anchor calls without
//! repeating the flag and table on every call.

use crate::config::CheckpointConfig;
use crate::error::AnchorError;
use crate::locator::{self, BlockIndex};
use crate::progress::{self, ProgressEstimate};
use crate::registry::{select_registry, CheckpointRegistry};
use crate::types::{BlockHash, BlockIndexEntry};

/// Process-wide checkpoint handle. Cheap to clone and share across threads.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoints {
    config: CheckpointConfig,
    registry: &'static CheckpointRegistry,
}

impl Checkpoints {
    /// Select the shipped registry for `config.network`.
    pub fn new(config: CheckpointConfig) -> Self {
        let registry = select_registry(config.network);
        tracing::debug!(
            network = %config.network,
            enabled = config.enabled,
            max_height = registry.max_checkpoint_height(true),
            "Checkpoints initialised"
        );
        Self { config, registry }
    }

    /// Use a custom registry, e.g. one leaked for a private network.
    pub fn with_registry(config: CheckpointConfig, registry: &'static CheckpointRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &CheckpointConfig {
        &self.config
    }

    pub fn registry(&self) -> &'static CheckpointRegistry {
        self.registry
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn check_block(&self, height: u64, hash: &BlockHash) -> bool {
        crate::verifier::check_block(self.registry, height, hash, self.config.enabled)
    }

    pub fn verify_block(&self, height: u64, hash: &BlockHash) -> Result<(), AnchorError> {
        crate::verifier::verify_block(self.registry, height, hash, self.config.enabled)
    }

    pub fn guess_verification_progress(&self, node: Option<&BlockIndexEntry>, now: i64) -> f64 {
        progress::guess_verification_progress(node, self.registry, now)
    }

    pub fn guess_verification_progress_now(&self, node: Option<&BlockIndexEntry>) -> f64 {
        progress::guess_verification_progress_now(node, self.registry)
    }

    pub fn estimate_progress(&self, node: Option<&BlockIndexEntry>, now: i64) -> ProgressEstimate {
        progress::estimate_progress(node, self.registry, now)
    }

    pub fn last_checkpoint<I: BlockIndex + ?Sized>(&self, index: &I) -> Option<BlockIndexEntry> {
        locator::last_checkpoint(index, self.registry, self.config.enabled)
    }

    pub fn total_blocks_estimate(&self) -> u64 {
        locator::total_blocks_estimate(self.registry, self.config.enabled)
    }

    pub fn max_checkpoint_height(&self) -> u64 {
        self.registry.max_checkpoint_height(self.config.enabled)
    }
}

impl Default for Checkpoints {
    fn default() -> Self {
        Self::new(CheckpointConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::types::{Checkpoint, CheckpointStats, Network};

    #[test]
    fn facade_selects_network_table() {
        let main = Checkpoints::default();
        assert_eq!(main.registry().network(), Network::Main);
        assert_eq!(main.total_blocks_estimate(), 61_712);

        let test = Checkpoints::new(CheckpointConfig::testnet());
        assert_eq!(test.total_blocks_estimate(), 546);
        assert_eq!(test.max_checkpoint_height(), 546);
    }

    #[test]
    fn disabled_facade_is_permissive() {
        let cps = Checkpoints::new(CheckpointConfig::default().with_enabled(false));
        assert!(!cps.is_enabled());
        assert!(cps.check_block(0, &BlockHash::ZERO));
        assert!(cps.verify_block(0, &BlockHash::ZERO).is_ok());
        assert_eq!(cps.total_blocks_estimate(), 0);

        let genesis = *cps.registry().get(0).unwrap();
        let index: HashMap<BlockHash, BlockIndexEntry> = [(
            genesis,
            BlockIndexEntry {
                height: 0,
                hash: genesis,
                timestamp: 0,
                chain_tx_count: 1,
            },
        )]
        .into_iter()
        .collect();
        assert!(cps.last_checkpoint(&index).is_none());
    }

    #[test]
    fn enabled_facade_rejects_forgery() {
        let cps = Checkpoints::default();
        assert!(!cps.check_block(16, &BlockHash::ZERO));
        assert!(cps.verify_block(16, &BlockHash::ZERO).unwrap_err().is_fatal());
    }

    #[test]
    fn custom_registry_drives_progress() {
        let reg = CheckpointRegistry::new(
            Network::Main,
            vec![Checkpoint {
                height: 16,
                hash: BlockHash::new([0x16; 32]),
            }],
            CheckpointStats {
                last_checkpoint_time: 0,
                last_checkpoint_tx_count: 1000,
                tx_per_day: 100.0,
            },
        )
        .unwrap();
        let cps = Checkpoints::with_registry(CheckpointConfig::default(), Box::leak(Box::new(reg)));
        let node = BlockIndexEntry {
            height: 8,
            hash: BlockHash::ZERO,
            timestamp: 0,
            chain_tx_count: 500,
        };
        let p = cps.guess_verification_progress(Some(&node), 86_400);
        assert!((p - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(cps.estimate_progress(None, 0).fraction, 0.0);
        assert!(cps.guess_verification_progress_now(Some(&node)) < p);
    }
}
