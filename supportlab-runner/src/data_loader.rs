//! Snapshot loading from the collector's wide CSV export.
//!
//! The upstream collector persists one wide row per observation:
//! `collected_at,symbol,price,low,<indicator columns...>`. This adapter is
//! the boundary between that file format and the engine — it parses
//! timestamps, normalizes empty/NaN cells to absent, groups rows per
//! instrument in file order, and rejects streams that go backwards in time.

use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::path::Path;
use supportlab_core::domain::Snapshot;
use thiserror::Error;

/// Errors from the snapshot loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: unparsable timestamp '{value}'")]
    BadTimestamp { row: usize, value: String },

    #[error("snapshots for '{instrument}' go backwards in time at row {row}")]
    OutOfOrder { instrument: String, row: usize },
}

/// Snapshots grouped per instrument, plus the column inventory.
#[derive(Debug, Clone, Default)]
pub struct LoadedData {
    /// Instruments in order of first appearance in the file.
    pub instruments: Vec<String>,
    pub snapshots: HashMap<String, Vec<Snapshot>>,
    /// Every non-core column, in file order. Candidate selection derives
    /// from this when the config names none explicitly.
    pub indicator_columns: Vec<String>,
}

impl LoadedData {
    pub fn total_snapshots(&self) -> usize {
        self.snapshots.values().map(Vec::len).sum()
    }

    /// The instrument's snapshot slice; empty when the file had no rows
    /// for it.
    pub fn for_instrument(&self, instrument: &str) -> &[Snapshot] {
        self.snapshots
            .get(instrument)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Load the wide CSV export at `path`.
///
/// A malformed timestamp or a time-travelling row is a hard error; a cell
/// that fails to parse as a number is treated as absent with a warning, so
/// one bad indicator value never costs the whole file.
pub fn load_snapshots(path: &Path) -> Result<LoadedData, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Read {
            path: path.display().to_string(),
            source,
        })?
        .clone();

    let col = |name: &'static str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))
    };
    let collected_at_col = col("collected_at")?;
    let symbol_col = col("symbol")?;
    let price_col = col("price")?;
    let low_col = headers.iter().position(|h| h == "low");

    let core_cols = [Some(collected_at_col), Some(symbol_col), Some(price_col), low_col];
    let indicator_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| !core_cols.contains(&Some(*i)))
        .map(|(i, name)| (i, name.to_string()))
        .collect();

    let mut data = LoadedData {
        indicator_columns: indicator_cols.iter().map(|(_, name)| name.clone()).collect(),
        ..LoadedData::default()
    };

    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(|source| LoadError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let raw_timestamp = record.get(collected_at_col).unwrap_or_default();
        let observed_at = parse_timestamp(raw_timestamp).ok_or_else(|| LoadError::BadTimestamp {
            row,
            value: raw_timestamp.to_string(),
        })?;

        let instrument = record.get(symbol_col).unwrap_or_default().to_string();

        let Some(price) = parse_cell(record.get(price_col)) else {
            log::warn!("row {row}: unusable price for '{instrument}'; skipping row");
            continue;
        };

        let low = low_col.and_then(|i| parse_cell(record.get(i)));

        let mut indicators = HashMap::with_capacity(indicator_cols.len());
        for (i, name) in &indicator_cols {
            if let Some(value) = parse_cell(record.get(*i)) {
                indicators.insert(name.clone(), value);
            }
        }

        if !data.snapshots.contains_key(&instrument) {
            data.instruments.push(instrument.clone());
        }
        let series = data.snapshots.entry(instrument.clone()).or_default();
        if let Some(last) = series.last() {
            if observed_at < last.observed_at {
                return Err(LoadError::OutOfOrder { instrument, row });
            }
        }
        series.push(Snapshot {
            instrument,
            observed_at,
            price,
            low,
            indicators,
        });
    }

    Ok(data)
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Numeric cell → value; empty, unparsable, and non-finite cells are all
/// "absent".
fn parse_cell(cell: Option<&str>) -> Option<f64> {
    let cell = cell?.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cell_normalizes_absence() {
        assert_eq!(parse_cell(Some("42.5")), Some(42.5));
        assert_eq!(parse_cell(Some("")), None);
        assert_eq!(parse_cell(Some("  ")), None);
        assert_eq!(parse_cell(Some("NaN")), None);
        assert_eq!(parse_cell(Some("inf")), None);
        assert_eq!(parse_cell(Some("n/a")), None);
        assert_eq!(parse_cell(None), None);
    }

    #[test]
    fn parse_timestamp_accepts_both_separators() {
        assert!(parse_timestamp("2024-01-01 08:00:00").is_some());
        assert!(parse_timestamp("2024-01-01T08:00:00").is_some());
        assert!(parse_timestamp("01/01/2024").is_none());
    }
}
