//! chainanchor-core — hardcoded checkpoint trust anchors for a block
//! validation engine.
//!
//! # Architecture
//!
//! ```text
//! CheckpointConfig (enabled, network)
//!        │
//!        ▼
//! select_registry ──► CheckpointRegistry (shipped, immutable, OnceLock)
//!                          ├── verifier   check_block / verify_block
//!                          ├── progress   guess_verification_progress
//!                          └── locator    last_checkpoint / total_blocks_estimate
//!
//! Checkpoints = config + registry, bound once per process
//! ```
//!
//! Everything here is synchronous and pure apart from reading the embedder's
//! [`BlockIndex`].

pub mod checkpoints;
pub mod config;
pub mod error;
pub mod locator;
pub mod progress;
pub mod registry;
pub mod types;
pub mod verifier;

pub use checkpoints::Checkpoints;
pub use config::CheckpointConfig;
pub use error::AnchorError;
pub use locator::{last_checkpoint, total_blocks_estimate, BlockIndex};
pub use progress::{
    estimate_progress, guess_verification_progress, guess_verification_progress_now,
    ProgressEstimate, VerificationPhase, SIGCHECK_VERIFICATION_FACTOR,
};
pub use registry::{select_registry, CheckpointRegistry};
pub use types::{BlockHash, BlockIndexEntry, Checkpoint, CheckpointStats, Network};
pub use verifier::{check_block, verify_block};
