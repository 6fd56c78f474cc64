//! Outcome — one support value judged against one session.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Result of classifying a session (completed or still open) against a
/// support value taken from the session's start snapshot.
///
/// The pass/fail verdict is close-based: it compares the session's closing
/// reference price to the support. The intrasession safety distance is a
/// separate, first-class measurement — a session can pass on close while
/// having breached the support intraday, and both facts are reported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Outcome {
    pub instrument: String,
    /// Session start, in the configured local clock.
    pub session_start: NaiveDateTime,
    /// Session end in the local clock; `None` for provisional outcomes.
    pub session_end: Option<NaiveDateTime>,
    /// The chosen indicator's value at the start boundary.
    pub support_value: f64,
    /// Closing price of the session, or the latest price for an open one.
    pub reference_value: f64,
    /// `reference_value >= support_value`; equality counts as a pass.
    pub passed: bool,
    pub diff: f64,
    pub pct_diff: f64,
    /// Minimum reported low strictly within the session window. Never set
    /// on provisional outcomes.
    pub true_low: Option<f64>,
    /// `100 * (true_low - support) / true_low`. Positive means the support
    /// sat below the realized low (no intrasession breach); negative means
    /// the low dipped under the support even if the close held.
    pub safety_distance_pct: Option<f64>,
    /// True when classified against a still-open session.
    pub provisional: bool,
}
