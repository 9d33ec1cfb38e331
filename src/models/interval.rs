use super::resource::Workday;
use crate::utils::time::localize;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};
use serde::Serialize;

/// Absolute instant, carried in the report's fixed time zone.
pub type Stamp = DateTime<FixedOffset>;

/// Absolute `(start, end)` pair.
///
/// Nothing forces `start < end`: clipped slot ranges and misconfigured
/// working days can be empty or inverted, and callers check `is_empty()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: Stamp,
    pub end: Stamp,
}

impl Span {
    pub fn new(start: Stamp, end: Stamp) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Length in whole seconds, never negative.
    pub fn seconds(&self) -> i64 {
        self.duration().num_seconds().max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Strict overlap test: a range that only touches a boundary does not overlap.
    pub fn overlaps(&self, start: Stamp, end: Stamp) -> bool {
        start < self.end && end > self.start
    }

    /// Clip `[start, end]` to this span. The result may be empty.
    pub fn clip(&self, start: Stamp, end: Stamp) -> Span {
        Span::new(start.max(self.start), end.min(self.end))
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// One calendar day combined with a resource's working hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub date: NaiveDate,
    pub span: Span,
}

impl DayWindow {
    pub fn new(date: NaiveDate, workday: &Workday, tz: FixedOffset) -> Self {
        Self {
            date,
            span: Span::new(
                localize(tz, date.and_time(workday.start)),
                localize(tz, date.and_time(workday.end)),
            ),
        }
    }
}

/// A slot clipped to a working window, still tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusyInterval {
    pub span: Span,
    pub slot_id: i64,
    pub order_id: i64,
    pub order_title: Option<String>,
}
