//! Session alignment — extracting anchor-hour boundaries from a raw stream.
//!
//! The collector samples on its own schedule, so the stream is dense around
//! the anchor hour on good days and gappy on bad ones. Alignment only picks
//! out the qualifying observations; gap handling happens in pairing.

use crate::domain::Snapshot;
use chrono::Timelike;

/// Indices of snapshots whose shifted local hour equals the anchor hour.
///
/// Pure function of its input: duplicates on the same calendar hour are all
/// retained in order, and de-duplication is left to the caller.
pub fn session_boundaries(
    snapshots: &[Snapshot],
    anchor_hour: u32,
    utc_offset_hours: i64,
) -> Vec<usize> {
    snapshots
        .iter()
        .enumerate()
        .filter(|(_, snap)| snap.local_time(utc_offset_hours).hour() == anchor_hour)
        .map(|(i, _)| i)
        .collect()
}
