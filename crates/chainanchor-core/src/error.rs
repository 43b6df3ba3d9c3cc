//! Error types for checkpoint verification and registry construction.

use thiserror::Error;

use crate::types::BlockHash;

/// Errors that can occur while verifying blocks against checkpoints.
#[derive(Debug, Error)]
pub enum AnchorError {
    /// The block at a checkpointed height does not carry the registered hash.
    /// The candidate chain must be rejected outright.
    #[error("Checkpoint mismatch at height {height}: expected {expected}, got {actual}")]
    CheckpointMismatch {
        height: u64,
        expected: BlockHash,
        actual: BlockHash,
    },

    #[error("Invalid block hash: {0}")]
    InvalidHash(String),

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Checkpoint registry must contain at least one checkpoint")]
    EmptyRegistry,

    #[error("Checkpoint heights must strictly increase: {next} follows {previous}")]
    NonMonotonicHeight { previous: u64, next: u64 },

    #[error("Invalid checkpoint stats: {0}")]
    InvalidStats(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl AnchorError {
    /// Returns `true` if the error is a consensus violation (the chain is invalid).
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::CheckpointMismatch { .. })
    }

    /// Nothing in this crate fails transiently, so nothing is retryable.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
