//! Calendar week boundaries in a fixed reference timezone.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDateTime, NaiveTime, Utc};

use crate::models::{TimeWindow, WindowKind};

/// Computes week windows for a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct WeekCalculator {
    offset: FixedOffset,
}

impl WeekCalculator {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Korea Standard Time (UTC+9).
    pub fn kst() -> Self {
        Self::new(FixedOffset::east_opt(9 * 3600).expect("UTC+9 is a valid offset"))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The window of `kind` as seen at `now`.
    pub fn window(&self, now: DateTime<Utc>, kind: WindowKind) -> TimeWindow {
        let local = now.with_timezone(&self.offset);
        let weekday = i64::from(local.weekday().num_days_from_monday());

        let days_back = match kind {
            WindowKind::PriorWeek => weekday + 7,
            WindowKind::CurrentWeekToDate => weekday,
        };
        let monday = (local.date_naive() - Duration::days(days_back)).and_time(NaiveTime::MIN);
        let start = self.to_utc(monday);

        let end = match kind {
            WindowKind::PriorWeek => {
                start + Duration::days(6) + Duration::hours(23) + Duration::minutes(59)
                    + Duration::seconds(59)
            }
            WindowKind::CurrentWeekToDate => now,
        };

        TimeWindow { start, end }
    }

    /// Interpret a wall-clock time in the reference offset as a UTC instant.
    fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        let shift = Duration::seconds(i64::from(self.offset.local_minus_utc()));
        DateTime::from_naive_utc_and_offset(local - shift, Utc)
    }
}

impl Default for WeekCalculator {
    fn default() -> Self {
        Self::kst()
    }
}
