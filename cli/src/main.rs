//! chainanchor CLI — inspect hardcoded checkpoints, verify blocks against
//! them, and estimate sync progress.
//!
//! # Commands
//! ```text
//! chainanchor info     [--no-checkpoints]
//! chainanchor list
//! chainanchor check    --height <N> --hash <HEX> [--no-checkpoints]
//! chainanchor progress --tx <N> --time <UNIX> [--height <N>] [--now <UNIX>]
//! ```
//! Global flags: `--testnet`, `--config <FILE>`, `--json`, `--log-level`,
//! `--log-json`.

use std::io::Write;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use chainanchor_core::{BlockHash, CheckpointConfig, Checkpoints, Network};
use clap::{error::ErrorKind, Args, Parser, Subcommand};

mod cmd_check;
mod cmd_info;
mod cmd_progress;
mod logging;

use crate::logging::{init_tracing, LogConfig};

pub(crate) const EXIT_SUCCESS: i32 = 0;
/// Usage errors and unreadable config.
pub(crate) const EXIT_FAILURE: i32 = 1;
/// A block failed its checkpoint.
pub(crate) const EXIT_CHECKPOINT_MISMATCH: i32 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "chainanchor",
    about = "Hardcoded checkpoint verification and sync-progress estimation",
    version
)]
struct Cli {
    /// Use the test network checkpoint table
    #[arg(long, global = true)]
    testnet: bool,

    /// Load checkpoint settings from a JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log level: trace | debug | info | warn | error
    #[arg(long, global = true, default_value = "error", value_name = "LEVEL")]
    log_level: String,

    /// Emit JSON logs on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct Enforcement {
    /// Disable checkpoint enforcement
    #[arg(long)]
    no_checkpoints: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the selected checkpoint table summary
    Info {
        #[command(flatten)]
        enforcement: Enforcement,
    },
    /// List every checkpoint in the selected table
    List,
    /// Verify a block hash against the checkpoint at its height
    Check {
        /// Block height
        #[arg(long)]
        height: u64,
        /// Block hash (64 hex digits, optional 0x prefix)
        #[arg(long)]
        hash: BlockHash,
        #[command(flatten)]
        enforcement: Enforcement,
    },
    /// Estimate verification progress for a block
    Progress {
        /// Cumulative transaction count at the block
        #[arg(long)]
        tx: u64,
        /// Block timestamp (unix seconds)
        #[arg(long, allow_negative_numbers = true)]
        time: i64,
        /// Block height
        #[arg(long, default_value_t = 0)]
        height: u64,
        /// Reference time (unix seconds, default: now)
        #[arg(long, allow_negative_numbers = true)]
        now: Option<i64>,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Info { .. } => "info",
            Self::List => "list",
            Self::Check { .. } => "check",
            Self::Progress { .. } => "progress",
        }
    }

    fn checkpoints_disabled(&self) -> bool {
        match self {
            Self::Info { enforcement } | Self::Check { enforcement, .. } => {
                enforcement.no_checkpoints
            }
            Self::List | Self::Progress { .. } => false,
        }
    }
}

impl Cli {
    fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.clone(),
            json: self.log_json,
        }
    }

    /// File settings first, then command-line overrides.
    fn checkpoint_config(&self) -> Result<CheckpointConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("cannot read config '{}'", path.display()))?;
                CheckpointConfig::from_json(&content)
                    .with_context(|| format!("invalid config '{}'", path.display()))?
            }
            None => CheckpointConfig::default(),
        };
        if self.testnet {
            config.network = Network::Test;
        }
        if self.command.checkpoints_disabled() {
            config.enabled = false;
        }
        Ok(config)
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(usage_exit_code(&e));
        }
    };
    init_tracing(&cli.log_config());

    let mut stdout = std::io::stdout().lock();
    let code = match run(&cli, &mut stdout) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            EXIT_FAILURE
        }
    };
    process::exit(code);
}

/// Help and version requests succeed; every other parse failure is a usage error.
fn usage_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
        _ => EXIT_FAILURE,
    }
}

fn run(cli: &Cli, out: &mut dyn Write) -> Result<i32> {
    let config = cli.checkpoint_config()?;
    tracing::debug!(
        command = cli.command.name(),
        network = %config.network,
        enabled = config.enabled,
        "Resolved configuration"
    );
    let checkpoints = Checkpoints::new(config);

    match &cli.command {
        Commands::Info { .. } => cmd_info::run(&checkpoints, cli.json, out)?,
        Commands::List => cmd_info::list(&checkpoints, cli.json, out)?,
        Commands::Check { height, hash, .. } => {
            return cmd_check::run(&checkpoints, *height, hash, cli.json, out)
        }
        Commands::Progress {
            tx,
            time,
            height,
            now,
        } => {
            let now = now.unwrap_or_else(|| chrono::Utc::now().timestamp());
            cmd_progress::run(&checkpoints, *height, *tx, *time, now, cli.json, out)?
        }
    }
    Ok(EXIT_SUCCESS)
}

pub(crate) fn write_json(out: &mut dyn Write, value: &serde_json::Value) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

pub(crate) fn format_time(unix: i64) -> String {
    chrono::DateTime::from_timestamp(unix, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| unix.to_string())
}
