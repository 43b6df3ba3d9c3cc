//! `info` and `list` — summarise or dump the selected checkpoint table.

use std::io::Write;

use anyhow::Result;
use chainanchor_core::Checkpoints;
use serde_json::json;

use crate::{format_time, write_json};

pub fn run(checkpoints: &Checkpoints, json: bool, out: &mut dyn Write) -> Result<()> {
    let registry = checkpoints.registry();
    let stats = registry.stats();

    if json {
        return write_json(
            out,
            &json!({
                "network": registry.network(),
                "enabled": checkpoints.is_enabled(),
                "checkpoints": registry.len(),
                "max_checkpoint_height": checkpoints.max_checkpoint_height(),
                "total_blocks_estimate": checkpoints.total_blocks_estimate(),
                "stats": stats,
            }),
        );
    }

    writeln!(out, "Network:               {}", registry.network())?;
    writeln!(out, "Checkpoints enabled:   {}", checkpoints.is_enabled())?;
    writeln!(out, "Checkpoint count:      {}", registry.len())?;
    writeln!(out, "Max checkpoint height: {}", checkpoints.max_checkpoint_height())?;
    writeln!(out, "Total blocks estimate: {}", checkpoints.total_blocks_estimate())?;
    writeln!(
        out,
        "Last checkpoint time:  {}",
        format_time(stats.last_checkpoint_time)
    )?;
    writeln!(out, "Last checkpoint txs:   {}", stats.last_checkpoint_tx_count)?;
    writeln!(out, "Transactions per day:  {}", stats.tx_per_day)?;
    Ok(())
}

pub fn list(checkpoints: &Checkpoints, json: bool, out: &mut dyn Write) -> Result<()> {
    let registry = checkpoints.registry();
    if json {
        let rows: Vec<_> = registry.iter().collect();
        return write_json(out, &json!(rows));
    }
    for cp in registry.iter() {
        writeln!(out, "{:>8}  {}", cp.height, cp.hash)?;
    }
    Ok(())
}
