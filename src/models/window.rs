//! Reporting time window.

use chrono::{DateTime, FixedOffset, Utc};

/// Which calendar week a run looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// Monday 00:00:00 to Sunday 23:59:59 of the previous week
    PriorWeek,
    /// Monday 00:00:00 of this week up to now
    CurrentWeekToDate,
}

/// A closed interval of UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Inclusive on both ends.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// `YYYY-MM-DD ~ YYYY-MM-DD` in the given offset.
    pub fn date_range(&self, offset: FixedOffset) -> String {
        format!(
            "{} ~ {}",
            self.start.with_timezone(&offset).format("%Y-%m-%d"),
            self.end.with_timezone(&offset).format("%Y-%m-%d")
        )
    }
}
