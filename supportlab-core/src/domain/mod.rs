//! Domain types: snapshots, sessions, outcomes, and aggregate stats.

mod outcome;
mod session;
mod snapshot;
mod stat;

pub use outcome::Outcome;
pub use session::{OpenSession, Session};
pub use snapshot::Snapshot;
pub use stat::{IndicatorKind, IndicatorStat};
