//! Single-support backtest — one named indicator over every session.

use crate::config::RunConfig;
use crate::domain::{Outcome, Snapshot};
use crate::engine::align::session_boundaries;
use crate::engine::classify::{classify_open, classify_session, ClassifyError};
use crate::engine::pair::pair_sessions;
use crate::engine::scan::ScanDiagnostics;
use serde::{Deserialize, Serialize};

/// Per-session outcomes for one instrument, completed sessions first and a
/// provisional outcome (if any) last.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestOutput {
    pub outcomes: Vec<Outcome>,
    pub diagnostics: ScanDiagnostics,
}

/// Completed-only pass/fail tally.
///
/// Provisional outcomes are excluded from the denominator; callers that
/// want them aggregate explicitly.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct BacktestSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub win_rate: Option<f64>,
}

impl BacktestSummary {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let completed: Vec<&Outcome> = outcomes.iter().filter(|o| !o.provisional).collect();
        let total = completed.len();
        let passed = completed.iter().filter(|o| o.passed).count();
        BacktestSummary {
            total,
            passed,
            failed: total - passed,
            win_rate: (total > 0).then(|| 100.0 * passed as f64 / total as f64),
        }
    }
}

/// Validate one indicator as a session support for one instrument.
///
/// Unlike the scanner there is no plausibility filter here — the caller
/// chose the indicator deliberately and gets every session's verdict.
pub fn backtest_instrument(
    snapshots: &[Snapshot],
    indicator: &str,
    config: &RunConfig,
) -> BacktestOutput {
    let boundaries = session_boundaries(snapshots, config.anchor_hour, config.utc_offset_hours);
    let pairing = pair_sessions(
        snapshots,
        &boundaries,
        config.session_length(),
        config.utc_offset_hours,
    );

    let mut diagnostics = ScanDiagnostics {
        invalid_gaps: pairing.invalid_gaps,
        ..ScanDiagnostics::default()
    };
    let mut outcomes = Vec::with_capacity(pairing.sessions.len() + 1);

    for &session in &pairing.sessions {
        let Some(support_value) = snapshots[session.start].indicator(indicator) else {
            diagnostics.missing_support += 1;
            continue;
        };
        match classify_session(snapshots, session, support_value, config.utc_offset_hours) {
            Ok(outcome) => outcomes.push(outcome),
            Err(ClassifyError::DegenerateSupport(_)) => diagnostics.degenerate_support += 1,
            Err(ClassifyError::DegenerateLow(_)) => diagnostics.degenerate_low += 1,
        }
    }

    if let Some(open) = pairing.open {
        if let Some(support_value) = snapshots[open.start].indicator(indicator) {
            match classify_open(snapshots, open, support_value, config.utc_offset_hours) {
                Ok(outcome) => outcomes.push(outcome),
                Err(ClassifyError::DegenerateSupport(_)) => diagnostics.degenerate_support += 1,
                Err(ClassifyError::DegenerateLow(_)) => diagnostics.degenerate_low += 1,
            }
        } else {
            diagnostics.missing_support += 1;
        }
    }

    BacktestOutput {
        outcomes,
        diagnostics,
    }
}
