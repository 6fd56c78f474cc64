//! Session pairing — turning boundaries into validated sessions.
//!
//! Adjacent boundaries form a candidate session. Real feeds drop out for
//! hours at a time, so a pair can span 30h or more; duplicates can make it
//! span minutes. Neither is a session: any delta other than the exact
//! configured length invalidates the pair, and it is dropped rather than
//! rounded or split.

use crate::domain::{OpenSession, Session, Snapshot};
use chrono::Duration;

/// Result of pairing one instrument's boundary sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    /// Valid sessions, in boundary order.
    pub sessions: Vec<Session>,
    /// Adjacent pairs dropped because their spacing was not the session
    /// length. Expected with real data; surfaced for diagnostics only.
    pub invalid_gaps: usize,
    /// The still-open session following the last boundary, when the latest
    /// snapshot falls strictly inside its window.
    pub open: Option<OpenSession>,
}

/// Pair adjacent boundaries into sessions and derive the open session.
///
/// The open session exists only when the latest snapshot's local time is
/// strictly after the last boundary and strictly before that boundary plus
/// one session length. Once a later boundary closes the interval it becomes
/// an ordinary session candidate instead.
pub fn pair_sessions(
    snapshots: &[Snapshot],
    boundaries: &[usize],
    session_length: Duration,
    utc_offset_hours: i64,
) -> Pairing {
    let mut sessions = Vec::new();
    let mut invalid_gaps = 0;

    for pair in boundaries.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let elapsed = snapshots[end].local_time(utc_offset_hours)
            - snapshots[start].local_time(utc_offset_hours);
        if elapsed == session_length {
            sessions.push(Session { start, end });
        } else {
            invalid_gaps += 1;
        }
    }

    let open = open_session(snapshots, boundaries, session_length, utc_offset_hours);

    Pairing {
        sessions,
        invalid_gaps,
        open,
    }
}

fn open_session(
    snapshots: &[Snapshot],
    boundaries: &[usize],
    session_length: Duration,
    utc_offset_hours: i64,
) -> Option<OpenSession> {
    let &start = boundaries.last()?;
    let latest = snapshots.len().checked_sub(1)?;

    let start_local = snapshots[start].local_time(utc_offset_hours);
    let latest_local = snapshots[latest].local_time(utc_offset_hours);

    if latest_local > start_local && latest_local < start_local + session_length {
        Some(OpenSession { start, latest })
    } else {
        None
    }
}
