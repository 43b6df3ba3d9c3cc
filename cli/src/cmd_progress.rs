//! `progress` — estimate verification progress for a block described on the
//! command line.

use std::io::Write;

use anyhow::Result;
use chainanchor_core::{BlockHash, BlockIndexEntry, Checkpoints};

use crate::{format_time, write_json};

pub fn run(
    checkpoints: &Checkpoints,
    height: u64,
    chain_tx_count: u64,
    timestamp: i64,
    now: i64,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let node = BlockIndexEntry {
        height,
        hash: BlockHash::ZERO,
        timestamp,
        chain_tx_count,
    };
    let estimate = checkpoints.estimate_progress(Some(&node), now);
    tracing::debug!(height, chain_tx_count, timestamp, now, "Estimated progress");

    if json {
        return write_json(out, &serde_json::to_value(estimate)?);
    }

    writeln!(out, "Block time:  {}", format_time(timestamp))?;
    writeln!(out, "As of:       {}", format_time(now))?;
    writeln!(out, "Phase:       {:?}", estimate.phase)?;
    writeln!(out, "Work done:   {:.3}", estimate.work_before)?;
    writeln!(out, "Work left:   {:.3}", estimate.work_after)?;
    writeln!(out, "Progress:    {:.4}%", estimate.percent())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chainanchor_core::CheckpointConfig;

    use super::*;

    #[test]
    fn caught_up_at_checkpoint_is_complete() {
        let cps = Checkpoints::default();
        let stats = *cps.registry().stats();
        let mut out = Vec::new();
        run(
            &cps,
            61_712,
            stats.last_checkpoint_tx_count,
            stats.last_checkpoint_time,
            stats.last_checkpoint_time,
            true,
            &mut out,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["fraction"], 1.0);
        assert_eq!(value["phase"], "checkpoint_backed");
    }

    #[test]
    fn past_checkpoint_text_output() {
        let cps = Checkpoints::new(CheckpointConfig::testnet());
        let stats = *cps.registry().stats();
        let mut out = Vec::new();
        run(
            &cps,
            600,
            stats.last_checkpoint_tx_count + 100,
            stats.last_checkpoint_time + 3_600,
            stats.last_checkpoint_time + 86_400,
            false,
            &mut out,
        )
        .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Phase:       FullVerification"), "{out}");
        assert!(out.contains("Progress:"));
    }
}
