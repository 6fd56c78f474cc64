//! Run orchestration — wires the loader, engine, and ranking together.
//!
//! Three entry points, one per mode:
//! - `run_scan()`: every candidate against every instrument, ranked
//! - `run_backtest()`: one named indicator, per-session verdicts
//! - `run_changes()`: close-to-close session statistics
//!
//! Instrument evaluations are independent, so each entry point fans out
//! over instruments with rayon and reassembles results in configured
//! instrument order; output is deterministic for a given input.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use supportlab_core::candidates::select_candidates;
use supportlab_core::config::{ConfigError, RunConfig};
use supportlab_core::domain::{IndicatorStat, Outcome};
use supportlab_core::engine::{
    analyze_changes, backtest_instrument, rank, rank_top, scan_instrument, BacktestSummary,
    ChangeSummary, ScanDiagnostics,
};

use crate::data_loader::{LoadError, LoadedData};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("data error: {0}")]
    Load(#[from] LoadError),

    #[error("failed to read config '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("input contains no snapshots at all")]
    EmptyInput,

    #[error("backtest mode requires an indicator name (config `indicator` or --indicator)")]
    MissingIndicator,
}

/// Load and validate a TOML run configuration.
pub fn load_config(path: &Path) -> Result<RunConfig, RunError> {
    let text = std::fs::read_to_string(path).map_err(|source| RunError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;
    let config: RunConfig = toml::from_str(&text).map_err(|source| RunError::ConfigParse {
        path: path.display().to_string(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Deterministic run identifier: BLAKE3 over the canonical config JSON.
///
/// Two runs with identical configuration share an id, which makes report
/// artifacts attributable and comparable.
pub fn run_id(config: &RunConfig) -> String {
    let json = serde_json::to_string(config).expect("RunConfig serialization failed");
    blake3::hash(json.as_bytes()).to_hex().to_string()
}

/// Ranked scan across all configured instruments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub run_id: String,
    /// Ranked stats across every instrument, win rate first.
    pub stats: Vec<IndicatorStat>,
    pub diagnostics: ScanDiagnostics,
    /// Candidate columns that were scanned, in evaluation order.
    pub candidates: Vec<String>,
}

/// Scan every candidate support across every configured instrument.
pub fn run_scan(
    config: &RunConfig,
    data: &LoadedData,
    top: Option<usize>,
) -> Result<ScanReport, RunError> {
    config.validate()?;
    if data.total_snapshots() == 0 {
        return Err(RunError::EmptyInput);
    }

    let candidates = match &config.candidates {
        Some(explicit) => explicit.clone(),
        None => select_candidates(data.indicator_columns.iter().map(String::as_str)),
    };

    let outputs: Vec<_> = config
        .instruments
        .par_iter()
        .map(|instrument| scan_instrument(data.for_instrument(instrument), &candidates, config))
        .collect();

    let mut diagnostics = ScanDiagnostics::default();
    let mut stats = Vec::new();
    for output in outputs {
        diagnostics.merge(&output.diagnostics);
        stats.extend(output.stats);
    }

    let stats = match top {
        Some(n) => rank_top(stats, n),
        None => rank(stats),
    };

    Ok(ScanReport {
        run_id: run_id(config),
        stats,
        diagnostics,
        candidates,
    })
}

/// Per-session verdicts for one indicator across all instruments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    pub run_id: String,
    pub indicator: String,
    /// Outcomes grouped by instrument in configured order; within an
    /// instrument, completed sessions first, provisional last.
    pub outcomes: Vec<Outcome>,
    /// Completed-only tally across all instruments.
    pub summary: BacktestSummary,
    pub diagnostics: ScanDiagnostics,
}

/// Validate one indicator as a session support across all instruments.
pub fn run_backtest(
    config: &RunConfig,
    data: &LoadedData,
    indicator_override: Option<&str>,
) -> Result<BacktestReport, RunError> {
    config.validate()?;
    if data.total_snapshots() == 0 {
        return Err(RunError::EmptyInput);
    }

    let indicator = indicator_override
        .or(config.indicator.as_deref())
        .ok_or(RunError::MissingIndicator)?
        .to_string();

    let outputs: Vec<_> = config
        .instruments
        .par_iter()
        .map(|instrument| backtest_instrument(data.for_instrument(instrument), &indicator, config))
        .collect();

    let mut diagnostics = ScanDiagnostics::default();
    let mut outcomes = Vec::new();
    for output in outputs {
        diagnostics.merge(&output.diagnostics);
        outcomes.extend(output.outcomes);
    }

    let summary = BacktestSummary::from_outcomes(&outcomes);

    Ok(BacktestReport {
        run_id: run_id(config),
        indicator,
        outcomes,
        summary,
        diagnostics,
    })
}

/// Close-to-close change statistics across all instruments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangesReport {
    pub run_id: String,
    /// One summary per configured instrument, in order.
    pub summaries: Vec<ChangeSummary>,
}

/// Compute session change statistics for every configured instrument.
pub fn run_changes(config: &RunConfig, data: &LoadedData) -> Result<ChangesReport, RunError> {
    config.validate()?;
    if data.total_snapshots() == 0 {
        return Err(RunError::EmptyInput);
    }

    let summaries: Vec<_> = config
        .instruments
        .par_iter()
        .map(|instrument| analyze_changes(data.for_instrument(instrument), config))
        .collect();

    Ok(ChangesReport {
        run_id: run_id(config),
        summaries,
    })
}
