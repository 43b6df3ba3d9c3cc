//! Checkpoint configuration, the already-resolved flags this crate consumes.

use serde::{Deserialize, Serialize};

use crate::error::AnchorError;
use crate::types::Network;

/// Resolved checkpoint settings for a process.
///
/// Parsing argv or environment into this struct is the embedder's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointConfig {
    /// Enforce hardcoded checkpoints. When `false`, every block passes and
    /// no anchor is reported.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Which shipped checkpoint table to use.
    #[serde(default)]
    pub network: Network,
}

fn default_enabled() -> bool {
    true
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            network: Network::Main,
        }
    }
}

impl CheckpointConfig {
    /// Test network, checkpoints enabled.
    pub fn testnet() -> Self {
        Self {
            network: Network::Test,
            ..Default::default()
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, AnchorError> {
        serde_json::from_str(json).map_err(|e| AnchorError::Config(e.to_string()))
    }
}
