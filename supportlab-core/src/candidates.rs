//! Candidate selection — classifying indicator columns by scale.
//!
//! Upstream collectors export dozens of indicator columns. Only price-scale
//! columns (moving averages, bands, pivots, overlays) make sense as support
//! levels; oscillator-scale columns (RSI, MACD, ...) live in a different
//! numeric range entirely. Name classification is an explicit predicate
//! here, and names it cannot place are reported instead of silently
//! included or excluded.

use crate::domain::IndicatorKind;

/// Substring patterns for columns that represent price levels.
pub const PRICE_SCALE_PATTERNS: &[&str] = &[
    "ema_", "sma_", "hull_ma", "vwma", // Moving averages
    "bb_", "keltner_", "donchian_", // Bands/channels
    "ichimoku_", // Ichimoku
    "pivot_",    // Pivots
    "parabolic_sar", "vwap", // Overlays
];

/// Substring patterns for columns known to be oscillators or otherwise not
/// price-scaled (percentages, ratings, ranges).
pub const OSCILLATOR_SCALE_PATTERNS: &[&str] = &[
    "rsi", "stoch", "macd", "cci", "adx", "awesome", "momentum", "williams", "ultimate", "aroon",
    "bull_bear", "roc", "mfi", "cmf", "atr", "rating", "di_plus", "di_minus", "change",
];

/// Numeric scale of an indicator column, judged by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorScale {
    /// Lives on the price axis; usable as a support level.
    PriceScale,
    /// Bounded/percentage-style value; never a support level.
    OscillatorScale,
    /// Matched neither pattern list.
    Unknown,
}

/// Classify a column name. Price patterns win over oscillator patterns,
/// matching the reference selection heuristic.
pub fn classify_name(name: &str) -> IndicatorScale {
    if PRICE_SCALE_PATTERNS.iter().any(|pat| name.contains(pat)) {
        IndicatorScale::PriceScale
    } else if OSCILLATOR_SCALE_PATTERNS.iter().any(|pat| name.contains(pat)) {
        IndicatorScale::OscillatorScale
    } else {
        IndicatorScale::Unknown
    }
}

/// Select the price-scale candidates from a column list, preserving input
/// order. Unclassifiable names are logged and left out; the plausibility
/// filter downstream catches anything the name heuristic got wrong.
pub fn select_candidates<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut candidates = Vec::new();
    for name in names {
        match classify_name(name) {
            IndicatorScale::PriceScale => candidates.push(name.to_string()),
            IndicatorScale::OscillatorScale => {}
            IndicatorScale::Unknown => {
                log::warn!("indicator column '{name}' matched no scale pattern; skipping");
            }
        }
    }
    candidates
}

/// Pivot levels are recomputed once per period and hold still within a
/// session; everything else drifts with price.
pub fn kind_for(name: &str) -> IndicatorKind {
    if name.contains("pivot") {
        IndicatorKind::Static
    } else {
        IndicatorKind::Dynamic
    }
}
