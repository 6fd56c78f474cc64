//! Ranking — win rate first, then tightest safe margin.

use crate::domain::IndicatorStat;
use std::cmp::Ordering;

/// Stable-sort stats by win rate descending, then mean safety distance
/// ascending (closest to zero from the positive side reads as tightest but
/// safe). Stats without a safety distance sort after those with one at the
/// same win rate; full ties keep candidate enumeration order.
///
/// Rate-first ordering is intentional: a 3-for-3 candidate outranks a
/// 9-of-10 one regardless of sample size.
pub fn rank(mut stats: Vec<IndicatorStat>) -> Vec<IndicatorStat> {
    stats.sort_by(compare);
    stats
}

/// Rank and keep the best `n` entries.
pub fn rank_top(stats: Vec<IndicatorStat>, n: usize) -> Vec<IndicatorStat> {
    let mut ranked = rank(stats);
    ranked.truncate(n);
    ranked
}

fn compare(a: &IndicatorStat, b: &IndicatorStat) -> Ordering {
    match b.win_rate.partial_cmp(&a.win_rate).unwrap_or(Ordering::Equal) {
        Ordering::Equal => match (a.avg_safety_distance_pct, b.avg_safety_distance_pct) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        other => other,
    }
}
