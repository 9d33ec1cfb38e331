//! Split one working day into busy and free stretches.

use crate::models::{BusyInterval, DayReport, DayWindow, Slot, Span};

/// Partition `window` using the slots booked on it.
///
/// Slots are clipped to the window; empty remainders are dropped.
/// Busy intervals are kept unmerged, ordered by start then slot id.
pub fn partition_day(window: &DayWindow, slots: &[Slot]) -> DayReport {
    let day = window.span;

    let mut busy: Vec<BusyInterval> = slots
        .iter()
        .filter_map(|slot| {
            let (start, end) = slot.bounds()?;
            if !day.overlaps(start, end) {
                return None;
            }
            let span = day.clip(start, end);
            if span.is_empty() {
                return None;
            }
            Some(BusyInterval {
                span,
                slot_id: slot.id,
                order_id: slot.order_id,
                order_title: slot.order_title.clone(),
            })
        })
        .collect();

    busy.sort_by(|a, b| {
        a.span
            .start
            .cmp(&b.span.start)
            .then(a.slot_id.cmp(&b.slot_id))
    });

    let free = free_gaps(&day, busy.iter().map(|b| &b.span));

    DayReport {
        date: window.date,
        window: day,
        busy,
        free,
    }
}

/// Gaps left in `window` by `busy`, which must be sorted by start.
///
/// The cursor only moves forward, so a short booking nested inside a
/// longer one never opens a gap.
pub fn free_gaps<'a, I>(window: &Span, busy: I) -> Vec<Span>
where
    I: IntoIterator<Item = &'a Span>,
{
    let mut free = Vec::new();
    let mut cursor = window.start;

    for span in busy {
        if span.start > cursor {
            free.push(Span::new(cursor, span.start));
        }
        if span.end > cursor {
            cursor = span.end;
        }
    }

    if cursor < window.end {
        free.push(Span::new(cursor, window.end));
    }

    free
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Workday;
    use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
    }

    fn at(hm: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(&format!("2026-10-20T{hm}:00+02:00")).unwrap()
    }

    fn window() -> DayWindow {
        DayWindow::new(date(), &Workday::fallback(), tz())
    }

    fn slot(id: i64, start: &str, end: &str) -> Slot {
        Slot::new(id, 100 + id).on_machine(1).between(at(start), at(end))
    }

    fn spans(report: &DayReport) -> (Vec<(String, String)>, Vec<(String, String)>) {
        let fmt = |s: &Span| (s.start.format("%H:%M").to_string(), s.end.format("%H:%M").to_string());
        (
            report.busy.iter().map(|b| fmt(&b.span)).collect(),
            report.free.iter().map(fmt).collect(),
        )
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn empty_day_is_one_free_stretch() {
        let report = partition_day(&window(), &[]);
        let (busy, free) = spans(&report);
        assert!(busy.is_empty());
        assert_eq!(free, pairs(&[("08:00", "17:00")]));
        assert_eq!(report.free_minutes(), 9 * 60);
    }

    #[test]
    fn single_booking_splits_the_day() {
        let report = partition_day(&window(), &[slot(1, "09:00", "11:00")]);
        let (busy, free) = spans(&report);
        assert_eq!(busy, pairs(&[("09:00", "11:00")]));
        assert_eq!(free, pairs(&[("08:00", "09:00"), ("11:00", "17:00")]));
        assert_eq!(report.busy[0].slot_id, 1);
        assert_eq!(report.busy[0].order_id, 101);
    }

    #[test]
    fn nested_bookings_do_not_open_gaps() {
        let report = partition_day(
            &window(),
            &[slot(1, "09:00", "12:00"), slot(2, "10:00", "11:00")],
        );
        let (busy, free) = spans(&report);
        assert_eq!(busy, pairs(&[("09:00", "12:00"), ("10:00", "11:00")]));
        assert_eq!(free, pairs(&[("08:00", "09:00"), ("12:00", "17:00")]));
    }

    #[test]
    fn bookings_outside_the_window_are_dropped() {
        let report = partition_day(
            &window(),
            &[slot(1, "05:00", "06:00"), slot(2, "17:00", "19:00")],
        );
        let (busy, free) = spans(&report);
        assert!(busy.is_empty());
        assert_eq!(free, pairs(&[("08:00", "17:00")]));
    }

    #[test]
    fn bookings_are_clipped_to_the_window() {
        let report = partition_day(
            &window(),
            &[slot(1, "06:00", "09:30"), slot(2, "16:00", "20:00")],
        );
        let (busy, free) = spans(&report);
        assert_eq!(busy, pairs(&[("08:00", "09:30"), ("16:00", "17:00")]));
        assert_eq!(free, pairs(&[("09:30", "16:00")]));
    }

    #[test]
    fn back_to_back_bookings_leave_no_gap() {
        let report = partition_day(
            &window(),
            &[slot(2, "10:00", "12:00"), slot(1, "08:00", "10:00")],
        );
        let (busy, free) = spans(&report);
        assert_eq!(busy, pairs(&[("08:00", "10:00"), ("10:00", "12:00")]));
        assert_eq!(free, pairs(&[("12:00", "17:00")]));
    }

    #[test]
    fn equal_starts_are_ordered_by_slot_id() {
        let report = partition_day(
            &window(),
            &[slot(7, "09:00", "10:00"), slot(3, "09:00", "13:00")],
        );
        let ids: Vec<i64> = report.busy.iter().map(|b| b.slot_id).collect();
        assert_eq!(ids, vec![3, 7]);
        let (_, free) = spans(&report);
        assert_eq!(free, pairs(&[("08:00", "09:00"), ("13:00", "17:00")]));
    }

    #[test]
    fn unbounded_and_degenerate_slots_are_skipped() {
        let open = Slot::new(1, 1).on_machine(1);
        let report = partition_day(
            &window(),
            &[open, slot(2, "10:00", "10:00"), slot(3, "12:00", "11:00")],
        );
        assert!(report.busy.is_empty());
        assert_eq!(report.free.len(), 1);
    }

    #[test]
    fn fully_booked_day_has_no_free_time() {
        let report = partition_day(&window(), &[slot(1, "07:00", "18:00")]);
        assert!(report.free.is_empty());
        assert_eq!(report.busy_minutes(), 9 * 60);
    }

    #[test]
    fn inverted_workday_yields_nothing() {
        let night = Workday::from_bounds(
            NaiveTime::from_hms_opt(22, 0, 0),
            NaiveTime::from_hms_opt(6, 0, 0),
        );
        let w = DayWindow::new(date(), &night, tz());
        let report = partition_day(&w, &[slot(1, "00:00", "23:00")]);
        assert!(report.busy.is_empty());
        assert!(report.free.is_empty());
    }
}
