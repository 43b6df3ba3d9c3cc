//! Verification progress estimation.
//!
//! Work is counted per transaction: 1.0 unit for each transaction at or
//! below the last checkpoint, and [`SIGCHECK_VERIFICATION_FACTOR`] units for
//! each transaction after it, since those need full signature checks. The
//! number of transactions still to come is extrapolated from the registry's
//! `tx_per_day`.
//!
//! The result is a heuristic for status reporting only. It is monotonic
//! while a node advances along one chain, but a reorg that rewrites
//! cumulative transaction counts can move it backwards.

use serde::Serialize;

use crate::registry::CheckpointRegistry;
use crate::types::BlockIndexEntry;

/// How much slower a post-checkpoint transaction is assumed to verify.
///
/// Reindexing from a fast disk on a slow CPU can be closer to 20; downloading
/// over a slow network on a fast multicore CPU, closer to 1.
pub const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Which side of the last checkpoint a block sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationPhase {
    /// No block to estimate from.
    Unknown,
    /// At or below the last checkpoint's cumulative transaction count.
    CheckpointBacked,
    /// Past the last checkpoint; transactions need full verification.
    FullVerification,
}

/// Progress fraction plus the work figures it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressEstimate {
    /// Estimated completion in `[0, 1]`.
    pub fraction: f64,
    /// Work units already done.
    pub work_before: f64,
    /// Work units estimated to remain.
    pub work_after: f64,
    pub phase: VerificationPhase,
}

impl ProgressEstimate {
    fn unknown() -> Self {
        Self {
            fraction: 0.0,
            work_before: 0.0,
            work_after: 0.0,
            phase: VerificationPhase::Unknown,
        }
    }

    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// Estimate how far verification has got at `node`, as of unix time `now`.
///
/// Returns 0.0 for `None`.
pub fn guess_verification_progress(
    node: Option<&BlockIndexEntry>,
    registry: &CheckpointRegistry,
    now: i64,
) -> f64 {
    estimate_progress(node, registry, now).fraction
}

/// [`guess_verification_progress`] against the system clock.
pub fn guess_verification_progress_now(
    node: Option<&BlockIndexEntry>,
    registry: &CheckpointRegistry,
) -> f64 {
    guess_verification_progress(node, registry, chrono::Utc::now().timestamp())
}

/// Full breakdown behind [`guess_verification_progress`].
pub fn estimate_progress(
    node: Option<&BlockIndexEntry>,
    registry: &CheckpointRegistry,
    now: i64,
) -> ProgressEstimate {
    let Some(node) = node else {
        return ProgressEstimate::unknown();
    };

    let stats = registry.stats();
    let checkpoint_tx = stats.last_checkpoint_tx_count as f64;
    let node_tx = node.chain_tx_count as f64;

    let backed = node.chain_tx_count <= stats.last_checkpoint_tx_count;
    let (work_before, work_after, phase) = if backed {
        let cheap_before = node_tx;
        let cheap_after = checkpoint_tx - node_tx;
        let expensive_after = days_between(stats.last_checkpoint_time, now) * stats.tx_per_day;
        (
            cheap_before,
            cheap_after + expensive_after * SIGCHECK_VERIFICATION_FACTOR,
            VerificationPhase::CheckpointBacked,
        )
    } else {
        let cheap_before = checkpoint_tx;
        let expensive_before = node_tx - checkpoint_tx;
        let expensive_after = days_between(node.timestamp, now) * stats.tx_per_day;
        (
            cheap_before + expensive_before * SIGCHECK_VERIFICATION_FACTOR,
            expensive_after * SIGCHECK_VERIFICATION_FACTOR,
            VerificationPhase::FullVerification,
        )
    };

    let total = work_before + work_after;
    // Nothing done and nothing left: treat as caught up.
    let fraction = if total > 0.0 { work_before / total } else { 1.0 };

    ProgressEstimate {
        fraction,
        work_before,
        work_after,
        phase,
    }
}

/// Elapsed days from `from` to `to`; a clock behind `from` counts as zero.
fn days_between(from: i64, to: i64) -> f64 {
    (to.saturating_sub(from)).max(0) as f64 / SECONDS_PER_DAY
}
