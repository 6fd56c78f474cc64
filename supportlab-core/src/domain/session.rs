//! Sessions — fixed-length windows between two anchor-hour boundaries.

use serde::{Deserialize, Serialize};

/// A completed trading session: two consecutive anchor-hour boundaries for
/// the same instrument, exactly one session length apart.
///
/// Sessions index into the instrument's snapshot slice rather than owning
/// snapshot copies; they are constructed transiently per run and never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Index of the start boundary in the instrument's snapshot slice.
    pub start: usize,
    /// Index of the end boundary in the instrument's snapshot slice.
    pub end: usize,
}

/// A session whose start boundary exists but whose end boundary has not
/// arrived yet. Evaluated against the most recent snapshot instead and
/// produces a provisional outcome.
///
/// At most one of these exists per instrument per run: the window following
/// the last boundary, and only while the latest snapshot still falls
/// strictly inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenSession {
    /// Index of the start boundary in the instrument's snapshot slice.
    pub start: usize,
    /// Index of the most recent snapshot for the instrument.
    pub latest: usize,
}
