//! Aggregate statistics for one (instrument, indicator) pair.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a candidate level moves with price or is fixed for the session.
///
/// Pivot levels are computed once per period and stay put; moving averages,
/// bands, and overlays drift with every bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorKind {
    Static,
    Dynamic,
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f.pad so table renderers can use width specifiers.
        match self {
            IndicatorKind::Static => f.pad("Static"),
            IndicatorKind::Dynamic => f.pad("Dynamic"),
        }
    }
}

/// Aggregate over all valid, plausible sessions for one candidate support
/// on one instrument. Constructed fresh per scan; immutable once produced.
///
/// A candidate with zero surviving sessions never becomes a stat row — the
/// scanner omits it entirely rather than reporting zeros.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndicatorStat {
    pub instrument: String,
    pub indicator: String,
    pub kind: IndicatorKind,
    /// Number of sessions that survived presence, plausibility, and
    /// degeneracy checks.
    pub sessions: usize,
    /// Sessions whose close held at or above the support.
    pub passes: usize,
    /// `100 * passes / sessions`.
    pub win_rate: f64,
    /// Mean safety-distance percentage across sessions that reported lows;
    /// `None` when no session contributed one.
    pub avg_safety_distance_pct: Option<f64>,
}
