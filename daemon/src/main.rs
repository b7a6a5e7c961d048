//! Pixel Pulse daemon — replays host-sequenced blocks into the ledger and
//! answers read-only queries against the persisted snapshot.

mod config;
mod ledger_state;

use std::path::PathBuf;

use clap::Parser;
use pulse_types::{ChallengeId, Principal, TokenId, VideoId};
use pulse_utils::LogFormat;
use serde::Serialize;

use config::DaemonConfig;

#[derive(Parser)]
#[command(name = "pulse-daemon", about = "Pixel Pulse ledger daemon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "PULSE_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory holding the ledger snapshot.
    #[arg(long, env = "PULSE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "PULSE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "PULSE_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Apply a JSON array of blocks and print their receipts.
    Replay {
        blocks: PathBuf,

        /// Print Prometheus metrics after the receipts.
        #[arg(long, env = "PULSE_ENABLE_METRICS")]
        metrics: bool,
    },
    /// Leaderboard stats for a principal.
    Stats { principal: Principal },
    /// Current owner of a reward token.
    Owner { token_id: u64 },
    /// Show a challenge record.
    Challenge { id: u64 },
    /// Show a video record.
    Video { id: u64 },
    /// Table sizes.
    Summary,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DaemonConfig::from_toml_file(path)?,
        None => DaemonConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Command::Replay { metrics: true, .. } = cli.command {
        config.enable_metrics = true;
    }

    pulse_utils::init_logging(config.log_format, &config.log_level)?;
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::Replay { blocks, .. } => {
            let report = ledger_state::replay(&config, &blocks)?;
            print_json(&report.receipts)?;
            if let Some(text) = report.metrics {
                print!("{text}");
            }
        }
        Command::Stats { principal } => {
            let loaded = ledger_state::load(&config)?;
            print_json(&loaded.ledger.get_user_stats(&principal)?)?;
        }
        Command::Owner { token_id } => {
            let loaded = ledger_state::load(&config)?;
            print_json(&loaded.ledger.get_owner(TokenId::new(token_id))?)?;
        }
        Command::Challenge { id } => {
            let loaded = ledger_state::load(&config)?;
            print_json(&loaded.ledger.get_challenge(ChallengeId::new(id))?)?;
        }
        Command::Video { id } => {
            let loaded = ledger_state::load(&config)?;
            print_json(&loaded.ledger.get_video(VideoId::new(id))?)?;
        }
        Command::Summary => {
            let loaded = ledger_state::load(&config)?;
            print_json(&loaded.ledger.summary()?)?;
        }
    }

    Ok(())
}
