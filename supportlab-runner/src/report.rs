//! Plain-text report rendering.
//!
//! Presentation only: these functions format engine output for a terminal
//! and never mutate it. Anything that wants a different surface (chat
//! delivery, JSON artifacts) consumes the report structs directly.

use std::fmt::Write;

use crate::runner::{BacktestReport, ChangesReport, ScanReport};
use supportlab_core::engine::ScanDiagnostics;

const RULE: &str =
    "====================================================================================================";

/// Render the ranked indicator table.
pub fn render_scan(report: &ScanReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "INDICATOR SUPPORT RANKING  (run {})", &report.run_id[..12]);
    let _ = writeln!(
        out,
        "Sorted by: 1. Win Rate (high to low) | 2. Safe Distance % (low to high)"
    );
    let _ = writeln!(out, "Note: Safe Dist % ~ 0 means support ~= session low.");
    let _ = writeln!(out, "      Safe Dist % > 0 means support below the session low (buffer).");
    let _ = writeln!(out, "      Safe Dist % < 0 means the low breached the support intraday.");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "{:<20} {:<22} {:<8} {:>8} {:>9} {:>12}",
        "Symbol", "Indicator", "Type", "Sessions", "Win Rate", "Safe Dist %"
    );

    for stat in &report.stats {
        let safety = stat
            .avg_safety_distance_pct
            .map(|d| format!("{d:.2}%"))
            .unwrap_or_else(|| "--".to_string());
        let _ = writeln!(
            out,
            "{:<20} {:<22} {:<8} {:>8} {:>8.0}% {:>12}",
            stat.instrument, stat.indicator, stat.kind, stat.sessions, stat.win_rate, safety
        );
    }

    if report.stats.is_empty() {
        let _ = writeln!(out, "(no indicator produced a valid, plausible session)");
    }

    let _ = writeln!(out);
    render_diagnostics(&mut out, &report.diagnostics);
    out
}

/// Render per-session backtest rows plus the completed-only summary.
pub fn render_backtest(report: &BacktestReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "SUPPORT VALIDATION: {}  (run {})",
        report.indicator,
        &report.run_id[..12]
    );
    let _ = writeln!(
        out,
        "Rule: PASS when the session close holds at or above the support at session start"
    );
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "{:<20} {:<17} {:<17} {:>14} {:>14} {:<12} {:>9}",
        "Symbol", "Session Start", "Session End", "Support", "Close", "Result", "Buffer %"
    );

    for outcome in &report.outcomes {
        let end = outcome
            .session_end
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "IN PROGRESS".to_string());
        let result = match (outcome.passed, outcome.provisional) {
            (true, false) => "PASS",
            (false, false) => "FAIL",
            (true, true) => "PASS (Prov)",
            (false, true) => "FAIL (Prov)",
        };
        let _ = writeln!(
            out,
            "{:<20} {:<17} {:<17} {:>14.2} {:>14.2} {:<12} {:>+8.2}%",
            outcome.instrument,
            outcome.session_start.format("%Y-%m-%d %H:%M").to_string(),
            end,
            outcome.support_value,
            outcome.reference_value,
            result,
            outcome.pct_diff,
        );
    }

    if report.outcomes.is_empty() {
        let _ = writeln!(out, "(no sessions analyzed)");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "----------------------------------------");
    let _ = writeln!(out, "Summary (completed sessions only):");
    let _ = writeln!(out, "Total Sessions: {}", report.summary.total);
    let _ = writeln!(out, "Passed: {}", report.summary.passed);
    let _ = writeln!(out, "Failed: {}", report.summary.failed);
    match report.summary.win_rate {
        Some(rate) => {
            let _ = writeln!(out, "Win Rate: {rate:.1}%");
        }
        None => {
            let _ = writeln!(out, "Win Rate: --");
        }
    }
    let _ = writeln!(out, "----------------------------------------");
    let _ = writeln!(out);
    render_diagnostics(&mut out, &report.diagnostics);
    out
}

/// Render up-day/down-day statistics per instrument.
pub fn render_changes(report: &ChangesReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "DAILY SESSION CHANGE ANALYSIS  (run {})",
        &report.run_id[..12]
    );
    let _ = writeln!(out, "{RULE}");

    for summary in &report.summaries {
        let total = summary.total_sessions();
        let _ = writeln!(out);
        let _ = writeln!(out, "=== {} ===", summary.instrument);
        let _ = writeln!(out, "Total Sessions: {total}");
        if total == 0 {
            continue;
        }

        let up_share = summary.up_share_pct().unwrap_or(0.0);
        let _ = writeln!(
            out,
            "Up Days: {} ({:.1}%)   Down Days: {} ({:.1}%)",
            summary.up_days.len(),
            up_share,
            summary.down_days.len(),
            100.0 - up_share,
        );
        if let Some((diff, pct)) = summary.avg_up() {
            let _ = writeln!(out, "Average Up Move:   {diff:+.2} ({pct:+.2}%)");
            for day in &summary.up_days {
                let _ = writeln!(
                    out,
                    "  {}: {:.2} -> {:.2} ({:+.2} / {:+.2}%)",
                    day.session_start.format("%Y-%m-%d"),
                    day.start_price,
                    day.end_price,
                    day.diff,
                    day.pct_change,
                );
            }
        }
        if let Some((diff, pct)) = summary.avg_down() {
            let _ = writeln!(out, "Average Down Move: {diff:.2} ({pct:.2}%)");
            for day in &summary.down_days {
                let _ = writeln!(
                    out,
                    "  {}: {:.2} -> {:.2} ({:+.2} / {:+.2}%)",
                    day.session_start.format("%Y-%m-%d"),
                    day.start_price,
                    day.end_price,
                    day.diff,
                    day.pct_change,
                );
            }
        }
        if let Some((diff, pct)) = summary.avg_overall() {
            let _ = writeln!(out, "Average Daily:     {diff:+.2} ({pct:+.2}%)");
        }
        if summary.skipped_degenerate > 0 {
            let _ = writeln!(
                out,
                "Skipped (degenerate start price): {}",
                summary.skipped_degenerate
            );
        }
    }

    out
}

fn render_diagnostics(out: &mut String, diagnostics: &ScanDiagnostics) {
    let _ = writeln!(
        out,
        "Dropped: {} gap pairs, {} missing supports, {} implausible, {} degenerate supports, {} degenerate lows",
        diagnostics.invalid_gaps,
        diagnostics.missing_support,
        diagnostics.implausible,
        diagnostics.degenerate_support,
        diagnostics.degenerate_low,
    );
}
