//! Indicator scanning — every candidate against every valid session.

use crate::candidates::kind_for;
use crate::config::RunConfig;
use crate::domain::{IndicatorStat, Snapshot};
use crate::engine::align::session_boundaries;
use crate::engine::classify::{classify_session, ClassifyError};
use crate::engine::pair::pair_sessions;
use serde::{Deserialize, Serialize};

/// Counts of everything the scan dropped and why.
///
/// Per-session anomalies are recovered locally — a bad data point costs one
/// (session, indicator) pair, never the run — but they stay distinguishable
/// here instead of vanishing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanDiagnostics {
    /// Boundary pairs whose spacing was not the session length.
    pub invalid_gaps: usize,
    /// (session, indicator) pairs skipped because the candidate had no
    /// value at the start boundary.
    pub missing_support: usize,
    /// Pairs dropped by the plausibility filter.
    pub implausible: usize,
    /// Pairs excluded because the support was zero or near-zero.
    pub degenerate_support: usize,
    /// Pairs excluded because the realized session low was unusable.
    pub degenerate_low: usize,
}

impl ScanDiagnostics {
    /// Fold another instrument's counts into this one.
    pub fn merge(&mut self, other: &ScanDiagnostics) {
        self.invalid_gaps += other.invalid_gaps;
        self.missing_support += other.missing_support;
        self.implausible += other.implausible;
        self.degenerate_support += other.degenerate_support;
        self.degenerate_low += other.degenerate_low;
    }
}

/// Stats plus drop counts for one instrument's scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutput {
    /// One stat per candidate with at least one surviving session, in
    /// candidate enumeration order.
    pub stats: Vec<IndicatorStat>,
    pub diagnostics: ScanDiagnostics,
}

/// Scan every candidate against every valid session of one instrument.
///
/// Candidates are evaluated independently with no shared mutable state;
/// output order follows the candidate list, so the scan is deterministic
/// for a given input order. Open sessions are not scanned — provisional
/// outcomes never enter aggregates.
pub fn scan_instrument(
    snapshots: &[Snapshot],
    candidates: &[String],
    config: &RunConfig,
) -> ScanOutput {
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
    let mut stats = Vec::new();

    for candidate in candidates {
        let mut sessions = 0usize;
        let mut passes = 0usize;
        let mut safety_sum = 0.0f64;
        let mut safety_count = 0usize;

        for &session in &pairing.sessions {
            let Some(support_value) = snapshots[session.start].indicator(candidate) else {
                diagnostics.missing_support += 1;
                continue;
            };

            let reference_value = snapshots[session.end].price;
            if (support_value - reference_value).abs()
                > config.plausibility_ratio * reference_value.abs()
            {
                diagnostics.implausible += 1;
                continue;
            }

            let outcome = match classify_session(
                snapshots,
                session,
                support_value,
                config.utc_offset_hours,
            ) {
                Ok(outcome) => outcome,
                Err(ClassifyError::DegenerateSupport(_)) => {
                    diagnostics.degenerate_support += 1;
                    continue;
                }
                Err(ClassifyError::DegenerateLow(_)) => {
                    diagnostics.degenerate_low += 1;
                    continue;
                }
            };

            sessions += 1;
            if outcome.passed {
                passes += 1;
            }
            if let Some(dist) = outcome.safety_distance_pct {
                safety_sum += dist;
                safety_count += 1;
            }
        }

        if sessions > 0 {
            stats.push(IndicatorStat {
                instrument: snapshots[0].instrument.clone(),
                indicator: candidate.clone(),
                kind: kind_for(candidate),
                sessions,
                passes,
                win_rate: 100.0 * passes as f64 / sessions as f64,
                avg_safety_distance_pct: (safety_count > 0)
                    .then(|| safety_sum / safety_count as f64),
            });
        }
    }

    ScanOutput { stats, diagnostics }
}
