//! Outcome classification — one support value against one session.

use crate::domain::{OpenSession, Outcome, Session, Snapshot};
use thiserror::Error;

/// Values this close to zero make percentage math meaningless.
pub const DEGENERATE_EPS: f64 = 1e-9;

/// Conditions that exclude a session from aggregates.
///
/// These are recovered locally by callers — the offending session is dropped
/// and counted, and the run continues.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClassifyError {
    /// Support value is zero or near-zero; `pct_diff` would be unbounded.
    #[error("support value {0} is too close to zero for percentage math")]
    DegenerateSupport(f64),

    /// Realized session low is zero, negative, or near-zero; the safety
    /// distance divides by it and would be meaningless.
    #[error("session low {0} is zero or negative")]
    DegenerateLow(f64),
}

/// Classify a completed session against a support value.
///
/// The caller has already resolved the support from the start snapshot;
/// a missing support is a skip, not a classification, and never reaches
/// this function.
pub fn classify_session(
    snapshots: &[Snapshot],
    session: Session,
    support_value: f64,
    utc_offset_hours: i64,
) -> Result<Outcome, ClassifyError> {
    let start = &snapshots[session.start];
    let end = &snapshots[session.end];
    let reference_value = end.price;

    let (diff, pct_diff) = diff_pct(reference_value, support_value)?;

    let true_low = session_true_low(snapshots, session, utc_offset_hours);
    let safety_distance_pct = match true_low {
        Some(low) if low <= DEGENERATE_EPS => return Err(ClassifyError::DegenerateLow(low)),
        Some(low) => Some(100.0 * (low - support_value) / low),
        None => None,
    };

    Ok(Outcome {
        instrument: start.instrument.clone(),
        session_start: start.local_time(utc_offset_hours),
        session_end: Some(end.local_time(utc_offset_hours)),
        support_value,
        reference_value,
        passed: reference_value >= support_value,
        diff,
        pct_diff,
        true_low,
        safety_distance_pct,
        provisional: false,
    })
}

/// Classify a still-open session against the latest snapshot.
///
/// Identical arithmetic to the completed case, but tagged provisional and
/// without a realized low — the session can still move.
pub fn classify_open(
    snapshots: &[Snapshot],
    open: OpenSession,
    support_value: f64,
    utc_offset_hours: i64,
) -> Result<Outcome, ClassifyError> {
    let start = &snapshots[open.start];
    let latest = &snapshots[open.latest];
    let reference_value = latest.price;

    let (diff, pct_diff) = diff_pct(reference_value, support_value)?;

    Ok(Outcome {
        instrument: start.instrument.clone(),
        session_start: start.local_time(utc_offset_hours),
        session_end: None,
        support_value,
        reference_value,
        passed: reference_value >= support_value,
        diff,
        pct_diff,
        true_low: None,
        safety_distance_pct: None,
        provisional: true,
    })
}

fn diff_pct(reference_value: f64, support_value: f64) -> Result<(f64, f64), ClassifyError> {
    if support_value.abs() <= DEGENERATE_EPS {
        return Err(ClassifyError::DegenerateSupport(support_value));
    }
    let diff = reference_value - support_value;
    Ok((diff, 100.0 * diff / support_value))
}

/// Minimum reported low strictly within `[start, end)` of the session.
///
/// Snapshots without a low are skipped; `None` when nothing in the window
/// reported one.
pub fn session_true_low(
    snapshots: &[Snapshot],
    session: Session,
    utc_offset_hours: i64,
) -> Option<f64> {
    let start_local = snapshots[session.start].local_time(utc_offset_hours);
    let end_local = snapshots[session.end].local_time(utc_offset_hours);

    snapshots
        .iter()
        .filter(|snap| {
            let local = snap.local_time(utc_offset_hours);
            local >= start_local && local < end_local
        })
        .filter_map(|snap| snap.low)
        .fold(None, |acc: Option<f64>, low| {
            Some(acc.map_or(low, |m| m.min(low)))
        })
}
