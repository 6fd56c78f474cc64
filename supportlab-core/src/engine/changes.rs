//! Daily-change analysis — close-to-close moves over the valid session set.
//!
//! No indicator involved: this answers "what does a typical session do"
//! for an instrument, split into up days and down days.

use crate::config::RunConfig;
use crate::domain::Snapshot;
use crate::engine::align::session_boundaries;
use crate::engine::classify::DEGENERATE_EPS;
use crate::engine::pair::pair_sessions;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One session's close-to-close move.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyChange {
    /// Session start in the local clock.
    pub session_start: NaiveDateTime,
    pub start_price: f64,
    pub end_price: f64,
    pub diff: f64,
    pub pct_change: f64,
}

/// Up/down split of an instrument's session moves.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChangeSummary {
    pub instrument: String,
    /// Sessions that closed flat or higher, in session order.
    pub up_days: Vec<DailyChange>,
    /// Sessions that closed lower, in session order.
    pub down_days: Vec<DailyChange>,
    /// Sessions excluded because the start price was unusable for
    /// percentage math.
    pub skipped_degenerate: usize,
}

impl ChangeSummary {
    pub fn total_sessions(&self) -> usize {
        self.up_days.len() + self.down_days.len()
    }

    pub fn up_share_pct(&self) -> Option<f64> {
        let total = self.total_sessions();
        (total > 0).then(|| 100.0 * self.up_days.len() as f64 / total as f64)
    }

    pub fn avg_up(&self) -> Option<(f64, f64)> {
        mean_move(&self.up_days)
    }

    pub fn avg_down(&self) -> Option<(f64, f64)> {
        mean_move(&self.down_days)
    }

    /// Mean (diff, pct) across all sessions regardless of direction.
    pub fn avg_overall(&self) -> Option<(f64, f64)> {
        let total = self.total_sessions();
        if total == 0 {
            return None;
        }
        let all = self.up_days.iter().chain(self.down_days.iter());
        let (sum_diff, sum_pct) = all.fold((0.0, 0.0), |(d, p), c| (d + c.diff, p + c.pct_change));
        Some((sum_diff / total as f64, sum_pct / total as f64))
    }
}

fn mean_move(changes: &[DailyChange]) -> Option<(f64, f64)> {
    if changes.is_empty() {
        return None;
    }
    let n = changes.len() as f64;
    let (sum_diff, sum_pct) = changes
        .iter()
        .fold((0.0, 0.0), |(d, p), c| (d + c.diff, p + c.pct_change));
    Some((sum_diff / n, sum_pct / n))
}

/// Compute the change summary for one instrument's snapshot sequence.
///
/// A flat close (`diff == 0`) counts as an up day.
pub fn analyze_changes(snapshots: &[Snapshot], config: &RunConfig) -> ChangeSummary {
    let boundaries = session_boundaries(snapshots, config.anchor_hour, config.utc_offset_hours);
    let pairing = pair_sessions(
        snapshots,
        &boundaries,
        config.session_length(),
        config.utc_offset_hours,
    );

    let instrument = snapshots
        .first()
        .map(|s| s.instrument.clone())
        .unwrap_or_default();
    let mut summary = ChangeSummary {
        instrument,
        ..ChangeSummary::default()
    };

    for session in pairing.sessions {
        let start = &snapshots[session.start];
        let end = &snapshots[session.end];

        if start.price.abs() <= DEGENERATE_EPS {
            summary.skipped_degenerate += 1;
            continue;
        }

        let diff = end.price - start.price;
        let change = DailyChange {
            session_start: start.local_time(config.utc_offset_hours),
            start_price: start.price,
            end_price: end.price,
            diff,
            pct_change: 100.0 * diff / start.price,
        };

        if diff >= 0.0 {
            summary.up_days.push(change);
        } else {
            summary.down_days.push(change);
        }
    }

    summary
}
