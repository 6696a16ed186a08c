//! The event clock stamping audit records.

use chrono::{DateTime, Utc};

/// Source of timestamps for audit records, queried once per event.
///
/// A fixed clock makes runs reproducible in tests and replays.
#[derive(Debug, Clone, Copy, Default)]
pub enum EventClock {
    /// Wall-clock time.
    #[default]
    System,
    /// A pinned instant, returned for every query.
    Fixed(DateTime<Utc>),
}

impl EventClock {
    /// The current time under this clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Self::System => Utc::now(),
            Self::Fixed(instant) => *instant,
        }
    }
}
