//! `check` — verify one block hash against the selected checkpoint table.

use std::io::Write;

use anyhow::Result;
use chainanchor_core::{BlockHash, Checkpoints};
use serde_json::json;

use crate::{write_json, EXIT_CHECKPOINT_MISMATCH, EXIT_SUCCESS};

/// Returns the process exit code: success, or the mismatch status when the
/// hash contradicts a checkpoint.
pub fn run(
    checkpoints: &Checkpoints,
    height: u64,
    hash: &BlockHash,
    json: bool,
    out: &mut dyn Write,
) -> Result<i32> {
    match checkpoints.verify_block(height, hash) {
        Ok(()) => {
            let note = if !checkpoints.is_enabled() {
                "checkpoints disabled"
            } else if checkpoints.registry().contains_height(height) {
                "matches checkpoint"
            } else {
                "no checkpoint at this height"
            };
            if json {
                write_json(
                    out,
                    &json!({
                        "height": height,
                        "hash": hash,
                        "accepted": true,
                        "note": note,
                    }),
                )?;
            } else {
                writeln!(out, "OK: block {height} accepted ({note})")?;
            }
            Ok(EXIT_SUCCESS)
        }
        Err(e) if e.is_fatal() => {
            if json {
                write_json(
                    out,
                    &json!({
                        "height": height,
                        "hash": hash,
                        "accepted": false,
                        "error": e.to_string(),
                    }),
                )?;
            } else {
                writeln!(out, "REJECTED: {e}")?;
            }
            Ok(EXIT_CHECKPOINT_MISMATCH)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use chainanchor_core::CheckpointConfig;

    use super::*;

    const GENESIS: &str = "d58888d61baa00c7acd6388356e449ca5d54beacab38361fd48cad0012959a2d";

    fn check(cps: &Checkpoints, height: u64, hash: &BlockHash, json: bool) -> (i32, String) {
        let mut out = Vec::new();
        let code = run(cps, height, hash, json, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn registered_hash_matches() {
        let genesis: BlockHash = GENESIS.parse().unwrap();
        let (code, out) = check(&Checkpoints::default(), 0, &genesis, false);
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(out, "OK: block 0 accepted (matches checkpoint)\n");
    }

    #[test]
    fn mismatch_is_reported_once() {
        let (code, out) = check(&Checkpoints::default(), 0, &BlockHash::ZERO, false);
        assert_eq!(code, EXIT_CHECKPOINT_MISMATCH);
        assert_eq!(out.lines().count(), 1, "{out}");
        assert!(out.starts_with("REJECTED: "));
        assert!(out.contains(GENESIS));
    }

    #[test]
    fn unconstrained_height_passes() {
        let (code, out) = check(&Checkpoints::default(), 3, &BlockHash::ZERO, false);
        assert_eq!(code, EXIT_SUCCESS);
        assert!(out.contains("no checkpoint at this height"));
    }

    #[test]
    fn disabled_checkpoints_pass_forgery() {
        let cps = Checkpoints::new(CheckpointConfig::default().with_enabled(false));
        let (code, out) = check(&cps, 0, &BlockHash::ZERO, false);
        assert_eq!(code, EXIT_SUCCESS);
        assert!(out.contains("checkpoints disabled"));
    }

    #[test]
    fn json_output_carries_verdict() {
        let (code, out) = check(&Checkpoints::default(), 16, &BlockHash::ZERO, true);
        assert_eq!(code, EXIT_CHECKPOINT_MISMATCH);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["accepted"], false);
        assert_eq!(value["height"], 16);
        assert!(value["error"].as_str().unwrap().contains("16"));

        let genesis: BlockHash = GENESIS.parse().unwrap();
        let (_, out) = check(&Checkpoints::default(), 0, &genesis, true);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["accepted"], true);
        assert_eq!(value["hash"], GENESIS);
    }
}
