//! Checkpoint registry — the hardcoded, per-network table of trusted blocks.
//!
//! The shipped tables are append-only across releases: new checkpoints are
//! added at higher heights, existing rows are never edited. Each table is
//! materialised once on first access and never mutated afterwards, so
//! concurrent readers need no locking.

use std::sync::OnceLock;

use serde::Serialize;

use crate::error::AnchorError;
use crate::types::{BlockHash, Checkpoint, CheckpointStats, Network};

// ─── Shipped tables ───────────────────────────────────────────────────────────

const fn cp(height: u64, hash: &str) -> Checkpoint {
    Checkpoint {
        height,
        hash: BlockHash::from_hex_const(hash),
    }
}

// Good checkpoint blocks have sane timestamps on both sides and contain no
// unusual transactions.
static MAIN_CHECKPOINTS: &[Checkpoint] = &[
    cp(0, "d58888d61baa00c7acd6388356e449ca5d54beacab38361fd48cad0012959a2d"),
    cp(1, "c8b400c4920f8fac074a2c0ee9dfbe1238ae8d1058f671ca2a687dce3f020bd3"),
    cp(2, "2bb1ba9134dc3586e4ed530f93ceed6bbafddbf0101209dcad0a04e39cf306d2"),
    cp(4, "1a25b800b63ce88712c6922b1250650fdedfa69dd4bdc7ce9416f91fa0509656"),
    cp(8, "03a74ca916a18c70269295c5dc99cd8324493a0f8a70e197b08940b1a02a4d97"),
    cp(16, "49787d2751d24fa66c9c951a2b6a9fd74e5fab31220324bc7e88c82ff1f6276a"),
    cp(32, "3e8440b622dfe14d0b31d3ee89743fb4e0461c83fc7736f438ee2a4f58f2c09a"),
    cp(64, "049c83dddabb4348cba5b2d33d0983cd1f9f45031dd92f69ecf28720fe768df7"),
    cp(128, "c95b575778f4521e3bfa193396303a076a9d10ec026cc5e24c04d8c1bbc006bb"),
    cp(256, "eaa0c8504f7072cedfdc9304629ebead05eb2489ea965ddad7647820a6294bc3"),
    cp(512, "2f1f852dcb7646424f211f289f01cc494da867899f0a57b6cc7bd6caa1bc78ef"),
    cp(1024, "da3ea3b06fec5d586f31b24cb351e3f7f364a2da89731242c7c46190d1494ff2"),
    cp(2048, "b073e6cf24e3351b6e48dcd38a3739f51465799a3463cc168bf12fe87b36fb14"),
    cp(4096, "9ae88c13647e26a7a2b6fda70375a38564af6bbdfd3d95e54a4df3f6ad4a4935"),
    cp(8192, "9576bdfb790f80043f014235d8f803fa0fb1aabd0c3cfea6c87fefed56f56a8a"),
    cp(16384, "2c6722c5d7359779e8e564b34358561e734453c414241276440a9ac1bbaa2694"),
    cp(32768, "514895ae1a7ff8cb57436fb4ee543f6d6561b21d327e3735403652c300764a1f"),
    cp(61712, "302391a7f45300cfd9b40e25526f194206ed05b7193126a0419da5b7c01d746c"),
];

const MAIN_STATS: CheckpointStats = CheckpointStats {
    last_checkpoint_time: 1_410_303_386,
    // The `tx=` figure of the best-chain log line at the last checkpoint.
    last_checkpoint_tx_count: 62_071,
    tx_per_day: 100.0,
};

static TEST_CHECKPOINTS: &[Checkpoint] = &[cp(
    546,
    "a0fea99a6897f531600c8ae53367b126824fd6a847b2b2b73817a95b8e27e602",
)];

const TEST_STATS: CheckpointStats = CheckpointStats {
    last_checkpoint_time: 1_365_458_829,
    last_checkpoint_tx_count: 547,
    tx_per_day: 576.0,
};

static MAIN_REGISTRY: OnceLock<CheckpointRegistry> = OnceLock::new();
static TEST_REGISTRY: OnceLock<CheckpointRegistry> = OnceLock::new();

/// Select the shipped registry for `network`.
///
/// Both tables are built lazily on first call and live for the rest of the
/// process.
pub fn select_registry(network: Network) -> &'static CheckpointRegistry {
    match network {
        Network::Main => MAIN_REGISTRY.get_or_init(|| {
            CheckpointRegistry::shipped(Network::Main, MAIN_CHECKPOINTS, MAIN_STATS)
        }),
        Network::Test => TEST_REGISTRY.get_or_init(|| {
            CheckpointRegistry::shipped(Network::Test, TEST_CHECKPOINTS, TEST_STATS)
        }),
    }
}

// ─── CheckpointRegistry ───────────────────────────────────────────────────────

/// An immutable table of checkpoints, ordered by strictly increasing height,
/// plus statistics about the last one.
#[derive(Debug, Clone, Serialize)]
pub struct CheckpointRegistry {
    network: Network,
    checkpoints: Vec<Checkpoint>,
    stats: CheckpointStats,
}

impl CheckpointRegistry {
    /// Build a custom registry (private networks, tests).
    ///
    /// `checkpoints` must be non-empty and in strictly increasing height order.
    pub fn new(
        network: Network,
        checkpoints: Vec<Checkpoint>,
        stats: CheckpointStats,
    ) -> Result<Self, AnchorError> {
        if checkpoints.is_empty() {
            return Err(AnchorError::EmptyRegistry);
        }
        for pair in checkpoints.windows(2) {
            if pair[1].height <= pair[0].height {
                return Err(AnchorError::NonMonotonicHeight {
                    previous: pair[0].height,
                    next: pair[1].height,
                });
            }
        }
        if !stats.tx_per_day.is_finite() || stats.tx_per_day < 0.0 {
            return Err(AnchorError::InvalidStats(format!(
                "tx_per_day must be a finite non-negative number, got {}",
                stats.tx_per_day
            )));
        }
        Ok(Self {
            network,
            checkpoints,
            stats,
        })
    }

    fn shipped(network: Network, table: &'static [Checkpoint], stats: CheckpointStats) -> Self {
        tracing::debug!(%network, checkpoints = table.len(), "Loading checkpoint registry");
        Self {
            network,
            checkpoints: table.to_vec(),
            stats,
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn stats(&self) -> &CheckpointStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// The registered hash at `height`, if that height is checkpointed.
    pub fn get(&self, height: u64) -> Option<&BlockHash> {
        self.checkpoints
            .binary_search_by_key(&height, |c| c.height)
            .ok()
            .map(|i| &self.checkpoints[i].hash)
    }

    pub fn contains_height(&self, height: u64) -> bool {
        self.get(height).is_some()
    }

    /// Checkpoints in ascending height order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Checkpoint> + '_ {
        self.checkpoints.iter()
    }

    /// The highest checkpoint in the table.
    pub fn last_checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }

    /// Highest checkpointed height, or 0 when enforcement is disabled.
    pub fn max_checkpoint_height(&self, enabled: bool) -> u64 {
        if !enabled {
            return 0;
        }
        self.last_checkpoint().map(|c| c.height).unwrap_or(0)
    }
}
