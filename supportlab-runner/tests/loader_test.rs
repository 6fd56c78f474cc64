//! Adapter tests: wide CSV in, normalized per-instrument snapshots out.

use std::io::Write;
use supportlab_runner::data_loader::{load_snapshots, LoadError};
use tempfile::NamedTempFile;

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn loads_and_groups_by_instrument() {
    let file = write_csv(
        "collected_at,symbol,price,low,donchian_lower,ema_50\n\
         2024-01-01 08:00:00,BINANCE:BTCUSDT,100.0,99.0,97.0,98.0\n\
         2024-01-01 08:00:00,BINANCE:ETHUSDT,10.0,9.9,9.7,9.8\n\
         2024-01-01 09:00:00,BINANCE:BTCUSDT,101.0,99.5,97.5,98.5\n",
    );
    let data = load_snapshots(file.path()).unwrap();

    assert_eq!(
        data.instruments,
        vec!["BINANCE:BTCUSDT".to_string(), "BINANCE:ETHUSDT".to_string()]
    );
    assert_eq!(data.total_snapshots(), 3);
    assert_eq!(data.for_instrument("BINANCE:BTCUSDT").len(), 2);
    assert_eq!(data.for_instrument("BINANCE:ETHUSDT").len(), 1);
    assert_eq!(data.indicator_columns, vec!["donchian_lower", "ema_50"]);

    let btc = data.for_instrument("BINANCE:BTCUSDT");
    assert_eq!(btc[0].price, 100.0);
    assert_eq!(btc[0].low, Some(99.0));
    assert_eq!(btc[0].indicator("donchian_lower"), Some(97.0));
}

#[test]
fn empty_and_nan_cells_become_absent() {
    let file = write_csv(
        "collected_at,symbol,price,low,donchian_lower,ema_50\n\
         2024-01-01 08:00:00,BINANCE:BTCUSDT,100.0,,NaN,98.0\n",
    );
    let data = load_snapshots(file.path()).unwrap();
    let snap = &data.for_instrument("BINANCE:BTCUSDT")[0];

    assert_eq!(snap.low, None);
    assert_eq!(snap.indicator("donchian_lower"), None);
    assert_eq!(snap.indicator("ema_50"), Some(98.0));
}

#[test]
fn missing_low_column_is_allowed() {
    let file = write_csv(
        "collected_at,symbol,price,donchian_lower\n\
         2024-01-01 08:00:00,BINANCE:BTCUSDT,100.0,97.0\n",
    );
    let data = load_snapshots(file.path()).unwrap();
    let snap = &data.for_instrument("BINANCE:BTCUSDT")[0];
    assert_eq!(snap.low, None);
    assert_eq!(data.indicator_columns, vec!["donchian_lower"]);
}

#[test]
fn missing_required_column_fails() {
    let file = write_csv("collected_at,symbol\n2024-01-01 08:00:00,BINANCE:BTCUSDT\n");
    let err = load_snapshots(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn("price")));
}

#[test]
fn malformed_timestamp_fails() {
    let file = write_csv(
        "collected_at,symbol,price\n\
         yesterday,BINANCE:BTCUSDT,100.0\n",
    );
    let err = load_snapshots(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::BadTimestamp { row: 1, .. }));
}

#[test]
fn out_of_order_rows_fail() {
    let file = write_csv(
        "collected_at,symbol,price\n\
         2024-01-02 08:00:00,BINANCE:BTCUSDT,100.0\n\
         2024-01-01 08:00:00,BINANCE:BTCUSDT,101.0\n",
    );
    let err = load_snapshots(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::OutOfOrder { row: 2, .. }));
}

#[test]
fn duplicate_timestamps_are_retained() {
    let file = write_csv(
        "collected_at,symbol,price\n\
         2024-01-01 08:00:00,BINANCE:BTCUSDT,100.0\n\
         2024-01-01 08:00:00,BINANCE:BTCUSDT,100.5\n",
    );
    let data = load_snapshots(file.path()).unwrap();
    assert_eq!(data.for_instrument("BINANCE:BTCUSDT").len(), 2);
}

#[test]
fn unusable_price_skips_only_that_row() {
    let file = write_csv(
        "collected_at,symbol,price\n\
         2024-01-01 08:00:00,BINANCE:BTCUSDT,not-a-price\n\
         2024-01-01 09:00:00,BINANCE:BTCUSDT,100.0\n",
    );
    let data = load_snapshots(file.path()).unwrap();
    assert_eq!(data.total_snapshots(), 1);
}

#[test]
fn iso_t_separator_is_accepted() {
    let file = write_csv(
        "collected_at,symbol,price\n\
         2024-01-01T08:00:00,BINANCE:BTCUSDT,100.0\n",
    );
    let data = load_snapshots(file.path()).unwrap();
    assert_eq!(data.total_snapshots(), 1);
}
