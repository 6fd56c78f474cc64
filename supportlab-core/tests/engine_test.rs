//! End-to-end engine scenarios: align → pair → classify → scan → rank.

use chrono::{Duration, NaiveDateTime};
use std::collections::HashMap;
use supportlab_core::config::RunConfig;
use supportlab_core::domain::Snapshot;
use supportlab_core::engine::{
    backtest_instrument, classify_session, pair_sessions, rank, scan_instrument,
    session_boundaries, BacktestSummary, ClassifyError,
};

fn config() -> RunConfig {
    RunConfig {
        anchor_hour: 16,
        utc_offset_hours: 8,
        session_length_hours: 24,
        plausibility_ratio: 0.5,
        instruments: vec!["BINANCE:BTCUSDT".into()],
        indicator: Some("donchian_lower".into()),
        candidates: None,
    }
}

fn at(timestamp: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn snap(observed_at: &str, price: f64, indicators: &[(&str, f64)]) -> Snapshot {
    Snapshot {
        instrument: "BINANCE:BTCUSDT".into(),
        observed_at: at(observed_at),
        price,
        low: Some(price - 1.0),
        indicators: indicators
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect::<HashMap<_, _>>(),
    }
}

/// Scenario A: two boundaries 24h apart, support 100 at the start, close
/// 105 at the end. One valid session, passed, diff +5, pct +5%.
#[test]
fn scenario_a_straightforward_pass() {
    // Source clock is UTC; +8 puts 08:00 at the 16:00 local anchor.
    let snapshots = vec![
        snap("2024-01-01 08:00:00", 102.0, &[("donchian_lower", 100.0)]),
        snap("2024-01-02 08:00:00", 105.0, &[("donchian_lower", 101.0)]),
    ];
    let config = config();

    let boundaries = session_boundaries(&snapshots, config.anchor_hour, config.utc_offset_hours);
    let pairing = pair_sessions(
        &snapshots,
        &boundaries,
        config.session_length(),
        config.utc_offset_hours,
    );
    assert_eq!(pairing.sessions.len(), 1);

    let outcome = classify_session(
        &snapshots,
        pairing.sessions[0],
        100.0,
        config.utc_offset_hours,
    )
    .unwrap();
    assert!(outcome.passed);
    assert_eq!(outcome.diff, 5.0);
    assert!((outcome.pct_diff - 5.0).abs() < 1e-12);
    assert_eq!(outcome.session_start, at("2024-01-01 16:00:00"));
    assert_eq!(outcome.session_end, Some(at("2024-01-02 16:00:00")));
}

/// Scenario B: a zero support raises DegenerateSupport; the session is
/// excluded from aggregates and the run continues.
#[test]
fn scenario_b_zero_support_is_degenerate_not_fatal() {
    let snapshots = vec![
        snap("2024-01-01 08:00:00", 102.0, &[("donchian_lower", 0.0)]),
        snap("2024-01-02 08:00:00", 105.0, &[("donchian_lower", 101.0)]),
    ];
    let config = config();

    let boundaries = session_boundaries(&snapshots, config.anchor_hour, config.utc_offset_hours);
    let pairing = pair_sessions(
        &snapshots,
        &boundaries,
        config.session_length(),
        config.utc_offset_hours,
    );

    let result = classify_session(
        &snapshots,
        pairing.sessions[0],
        0.0,
        config.utc_offset_hours,
    );
    assert_eq!(result, Err(ClassifyError::DegenerateSupport(0.0)));

    // Through the backtest path the session is dropped, not fatal.
    let output = backtest_instrument(&snapshots, "donchian_lower", &config);
    assert!(output.outcomes.is_empty());
    assert_eq!(output.diagnostics.degenerate_support, 1);
}

/// Scenario C: boundaries 30h apart produce zero sessions, not one with an
/// adjusted duration.
#[test]
fn scenario_c_thirty_hour_pair_is_discarded() {
    let snapshots = vec![
        snap("2024-01-01 08:00:00", 102.0, &[]),
        snap("2024-01-02 14:00:00", 105.0, &[]),
    ];
    // Inject the indices directly — a 30h-late observation no longer sits
    // on the anchor hour, which is exactly the outage shape in question.
    let pairing = pair_sessions(&snapshots, &[0, 1], Duration::hours(24), 8);
    assert!(pairing.sessions.is_empty());
    assert_eq!(pairing.invalid_gaps, 1);
}

/// Scenario D: last boundary at 16:00 local, latest snapshot six hours
/// later → exactly one provisional outcome, which disappears once a later
/// boundary closes the interval.
#[test]
fn scenario_d_open_session_lifecycle() {
    let config = config();
    let mut snapshots = vec![
        snap("2024-01-01 08:00:00", 102.0, &[("donchian_lower", 100.0)]),
        snap("2024-01-01 14:00:00", 103.0, &[("donchian_lower", 100.5)]),
    ];

    let output = backtest_instrument(&snapshots, "donchian_lower", &config);
    assert_eq!(output.outcomes.len(), 1);
    assert!(output.outcomes[0].provisional);
    assert_eq!(output.outcomes[0].reference_value, 103.0);

    // The next boundary arrives: the window closes, the provisional row is
    // replaced by a completed session, and no duplicate remains.
    snapshots.push(snap("2024-01-02 08:00:00", 104.0, &[("donchian_lower", 101.0)]));
    let output = backtest_instrument(&snapshots, "donchian_lower", &config);
    assert_eq!(output.outcomes.len(), 1);
    assert!(!output.outcomes[0].provisional);
    assert_eq!(output.outcomes[0].reference_value, 104.0);
}

/// Scenario E: a 3-for-3 candidate outranks a 9-of-10 one — rate first,
/// never sample-size-weighted.
#[test]
fn scenario_e_rate_first_ranking() {
    let config = config();
    let mut snapshots = Vec::new();
    for day in 1..=11 {
        let observed = format!("2024-01-{day:02} 08:00:00");
        // ema_50 present every day: supports 95 except day 1's 105, which
        // the first session then closes below.
        let mut indicators = vec![("ema_50", if day == 1 { 105.0 } else { 95.0 })];
        // donchian_lower present only on the first three session starts.
        if day <= 3 {
            indicators.push(("donchian_lower", 95.0));
        }
        snapshots.push(snap(&observed, 100.0, &indicators));
    }

    let candidates = vec!["ema_50".to_string(), "donchian_lower".to_string()];
    let output = scan_instrument(&snapshots, &candidates, &config);
    assert_eq!(output.stats.len(), 2);

    let ema = output
        .stats
        .iter()
        .find(|s| s.indicator == "ema_50")
        .unwrap();
    assert_eq!(ema.sessions, 10);
    assert_eq!(ema.passes, 9);
    assert!((ema.win_rate - 90.0).abs() < 1e-12);

    let donchian = output
        .stats
        .iter()
        .find(|s| s.indicator == "donchian_lower")
        .unwrap();
    assert_eq!(donchian.sessions, 3);
    assert_eq!(donchian.passes, 3);
    assert_eq!(donchian.win_rate, 100.0);

    let ranked = rank(output.stats);
    assert_eq!(ranked[0].indicator, "donchian_lower");
    assert_eq!(ranked[1].indicator, "ema_50");
}

/// An instrument with no boundaries at the anchor hour is a valid empty
/// outcome everywhere, never a crash.
#[test]
fn no_boundaries_is_a_valid_empty_result() {
    let config = config();
    let snapshots = vec![snap("2024-01-01 03:00:00", 100.0, &[("ema_50", 99.0)])];

    let scan = scan_instrument(&snapshots, &["ema_50".to_string()], &config);
    assert!(scan.stats.is_empty());

    let backtest = backtest_instrument(&snapshots, "ema_50", &config);
    assert!(backtest.outcomes.is_empty());
    assert_eq!(
        BacktestSummary::from_outcomes(&backtest.outcomes).win_rate,
        None
    );
}

/// Provisional rows keep the same arithmetic as completed ones but never
/// leak into the completed-only summary.
#[test]
fn provisional_excluded_from_win_rate() {
    let config = config();
    let snapshots = vec![
        snap("2024-01-01 08:00:00", 100.0, &[("donchian_lower", 99.0)]),
        snap("2024-01-02 08:00:00", 101.0, &[("donchian_lower", 102.0)]),
        snap("2024-01-02 20:00:00", 90.0, &[("donchian_lower", 95.0)]),
    ];
    let output = backtest_instrument(&snapshots, "donchian_lower", &config);
    assert_eq!(output.outcomes.len(), 2);

    let summary = BacktestSummary::from_outcomes(&output.outcomes);
    assert_eq!(summary.total, 1);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.win_rate, Some(100.0));
}
