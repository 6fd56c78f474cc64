//! Snapshot — the fundamental market data unit.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One observation of an instrument at a point in time: last price, the
/// intrasession low so far, and a bag of precomputed indicator values keyed
/// by column name.
///
/// Snapshots arrive in non-decreasing `observed_at` order per instrument.
/// Spacing between consecutive snapshots is not guaranteed — feed outages
/// produce gaps, and the engine detects them rather than bridging them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub instrument: String,
    /// Source-clock timestamp (the collector's fixed reference timezone).
    pub observed_at: NaiveDateTime,
    /// Last/close price at this observation.
    pub price: f64,
    /// Intrasession low at this observation. Absent in feeds that do not
    /// report it; absence disables safety-margin computation downstream.
    pub low: Option<f64>,
    /// Indicator values by column name. Adapters normalize NaN and empty
    /// cells to absent before snapshots reach the engine.
    pub indicators: HashMap<String, f64>,
}

impl Snapshot {
    /// The snapshot's timestamp shifted into the configured local clock.
    ///
    /// Used only for session alignment; storage ordering always follows
    /// `observed_at`.
    pub fn local_time(&self, utc_offset_hours: i64) -> NaiveDateTime {
        self.observed_at + Duration::hours(utc_offset_hours)
    }

    /// Look up an indicator value, treating non-finite values as absent.
    pub fn indicator(&self, name: &str) -> Option<f64> {
        self.indicators.get(name).copied().filter(|v| v.is_finite())
    }
}
