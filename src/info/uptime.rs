//! Process start time and uptime.

use std::fmt;
use std::time::Instant;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Moment the process started serving.
///
/// Captured once at startup and shared read-only with every handler.
/// Uptime is measured on the monotonic clock, so it never goes backwards.
#[derive(Debug, Clone, Copy)]
pub struct StartTime {
    instant: Instant,
    started_at: OffsetDateTime,
}

impl StartTime {
    /// Capture the current moment.
    pub fn now() -> Self {
        Self {
            instant: Instant::now(),
            started_at: OffsetDateTime::now_utc(),
        }
    }

    /// Wall-clock UTC time of startup.
    pub fn started_at(&self) -> OffsetDateTime {
        self.started_at
    }

    /// Whole seconds elapsed since startup.
    pub fn uptime(&self) -> Uptime {
        Uptime::from_seconds(self.instant.elapsed().as_secs())
    }
}

impl Default for StartTime {
    fn default() -> Self {
        Self::now()
    }
}

/// Elapsed time in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Uptime {
    /// Total whole seconds.
    pub seconds: u64,
}

impl Uptime {
    /// Wrap a number of seconds.
    pub fn from_seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Whole hours.
    pub fn hours(&self) -> u64 {
        self.seconds / 3600
    }

    /// Whole minutes left after removing full hours.
    pub fn minutes(&self) -> u64 {
        (self.seconds % 3600) / 60
    }

    /// Format as "<H> hours, <M> minutes". Leftover seconds are dropped.
    pub fn human(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Uptime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hours, {} minutes", self.hours(), self.minutes())
    }
}

/// Current UTC time as RFC 3339, e.g. "2024-01-15T10:30:00.123456Z".
pub fn current_timestamp() -> Result<String, time::error::Format> {
    OffsetDateTime::now_utc().format(&Rfc3339)
}
