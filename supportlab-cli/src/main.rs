//! SupportLab CLI — scan, backtest, and changes commands.
//!
//! Commands:
//! - `scan` — rank every candidate support column by session win rate
//! - `backtest` — validate one indicator as a session support
//! - `changes` — close-to-close session statistics per instrument
//!
//! All commands read the collector's wide CSV export (`--data`) and a TOML
//! run configuration (`--config`). `--json` swaps the text table for the
//! raw report structure.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use supportlab_runner::{
    load_config, load_snapshots, render_backtest, render_changes, render_scan, run_backtest,
    run_changes, run_scan,
};

#[derive(Parser)]
#[command(
    name = "supportlab",
    about = "SupportLab CLI — indicator support-level backtesting"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank candidate support columns by session win rate.
    Scan {
        /// Snapshot CSV export.
        #[arg(long)]
        data: PathBuf,

        /// TOML run configuration.
        #[arg(long)]
        config: PathBuf,

        /// Keep only the best N rows.
        #[arg(long)]
        top: Option<usize>,

        /// Emit the report as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Validate one indicator as a session support.
    Backtest {
        /// Snapshot CSV export.
        #[arg(long)]
        data: PathBuf,

        /// TOML run configuration.
        #[arg(long)]
        config: PathBuf,

        /// Indicator column to validate (overrides the config).
        #[arg(long)]
        indicator: Option<String>,

        /// Emit the report as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Close-to-close session change statistics.
    Changes {
        /// Snapshot CSV export.
        #[arg(long)]
        data: PathBuf,

        /// TOML run configuration.
        #[arg(long)]
        config: PathBuf,

        /// Emit the report as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            data,
            config,
            top,
            json,
        } => {
            let config = load_config(&config)?;
            let loaded = load_snapshots(&data)?;
            let report = run_scan(&config, &loaded, top)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_scan(&report));
            }
        }
        Commands::Backtest {
            data,
            config,
            indicator,
            json,
        } => {
            let config = load_config(&config)?;
            let loaded = load_snapshots(&data)?;
            let report = run_backtest(&config, &loaded, indicator.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_backtest(&report));
            }
        }
        Commands::Changes { data, config, json } => {
            let config = load_config(&config)?;
            let loaded = load_snapshots(&data)?;
            let report = run_changes(&config, &loaded)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_changes(&report));
            }
        }
    }

    Ok(())
}
