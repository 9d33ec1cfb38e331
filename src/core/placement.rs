//! Check a candidate booking against what is already on a resource.

use crate::core::store::SlotStore;
use crate::errors::AppResult;
use crate::models::{BusyInterval, DayWindow, Resource, Span};
use chrono::FixedOffset;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Placement {
    /// Existing bookings overlapping the candidate, clipped to it.
    pub conflicts: Vec<BusyInterval>,
    /// The candidate does not fit in the working window of the day it starts on.
    pub outside_workday: bool,
}

impl Placement {
    pub fn is_clear(&self) -> bool {
        self.conflicts.is_empty() && !self.outside_workday
    }
}

pub fn check_placement<S>(
    store: &S,
    resource: &Resource,
    candidate: &Span,
    tz: FixedOffset,
) -> AppResult<Placement>
where
    S: SlotStore + ?Sized,
{
    let existing = store.slots_overlapping(resource.reference(), candidate)?;

    let mut conflicts: Vec<BusyInterval> = existing
        .iter()
        .filter_map(|slot| {
            let (start, end) = slot.bounds()?;
            let span = candidate.clip(start, end);
            (!span.is_empty()).then(|| BusyInterval {
                span,
                slot_id: slot.id,
                order_id: slot.order_id,
                order_title: slot.order_title.clone(),
            })
        })
        .collect();
    conflicts.sort_by(|a, b| a.span.start.cmp(&b.span.start).then(a.slot_id.cmp(&b.slot_id)));

    let first_day = candidate.start.with_timezone(&tz).date_naive();
    let window = DayWindow::new(first_day, &resource.workday(), tz);

    Ok(Placement {
        conflicts,
        outside_workday: !window.span.contains(candidate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use crate::models::{ResourceKind, Slot};
    use chrono::DateTime;

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn at(hm: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(&format!("2026-10-20T{hm}:00Z")).unwrap()
    }

    fn store() -> MemoryStore {
        MemoryStore::new(vec![
            Slot::new(1, 5).on_machine(1).between(at("09:00"), at("11:00")),
            Slot::new(2, 6).on_machine(1).between(at("13:00"), at("14:00")),
        ])
    }

    #[test]
    fn free_stretch_is_clear() {
        let m = Resource::new(ResourceKind::Machine, 1, "Laser");
        let p = check_placement(&store(), &m, &Span::new(at("11:00"), at("13:00")), tz()).unwrap();
        assert!(p.is_clear());
    }

    #[test]
    fn overlap_is_reported_clipped() {
        let m = Resource::new(ResourceKind::Machine, 1, "Laser");
        let p = check_placement(&store(), &m, &Span::new(at("10:00"), at("13:30")), tz()).unwrap();

        let ids: Vec<i64> = p.conflicts.iter().map(|c| c.slot_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(p.conflicts[0].span, Span::new(at("10:00"), at("11:00")));
        assert!(!p.outside_workday);
    }

    #[test]
    fn after_hours_is_flagged() {
        let m = Resource::new(ResourceKind::Machine, 1, "Laser");
        let p = check_placement(&store(), &m, &Span::new(at("16:00"), at("18:00")), tz()).unwrap();
        assert!(p.conflicts.is_empty());
        assert!(p.outside_workday);
    }

    #[test]
    fn other_resources_do_not_conflict() {
        let other = Resource::new(ResourceKind::Machine, 2, "Press");
        let p = check_placement(&store(), &other, &Span::new(at("09:00"), at("11:00")), tz()).unwrap();
        assert!(p.is_clear());
    }
}
