//! Utilization of a resource over an absolute time range.
//!
//! load = busy hours / (workday hours * calendar days spanned) * 100
//!
//! Percentages are rounded half-to-even and are not capped:
//! double-booked resources report more than 100.

use crate::models::{Slot, Span};
use chrono::TimeDelta;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Booked time inside `range`. Each slot is clipped to the range first;
/// unbounded, inverted and zero-length slots add nothing.
pub fn busy_time(slots: &[Slot], range: &Span) -> TimeDelta {
    slots
        .iter()
        .filter_map(Slot::bounds)
        .filter(|(start, end)| range.overlaps(*start, *end))
        .map(|(start, end)| range.clip(start, end))
        .filter(|clipped| !clipped.is_empty())
        .fold(TimeDelta::zero(), |acc, clipped| acc + clipped.duration())
}

/// Number of calendar dates touched by `range`, both ends included.
pub fn inclusive_days(range: &Span) -> i64 {
    (range.end.date_naive() - range.start.date_naive()).num_days() + 1
}

pub fn load_percentage(workday_hours: f64, slots: &[Slot], range: &Span) -> i64 {
    let available_hours = workday_hours * inclusive_days(range) as f64;
    if available_hours <= 0.0 {
        return 0;
    }

    let busy_hours = busy_time(slots, range).num_milliseconds() as f64 / MS_PER_HOUR;
    (busy_hours / available_hours * 100.0).round_ties_even() as i64
}
