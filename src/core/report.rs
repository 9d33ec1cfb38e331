//! The two reports: load per resource, and free/busy per day.

use crate::core::calculator::breakdown::partition_day;
use crate::core::calculator::load::load_percentage;
use crate::core::store::SlotStore;
use crate::errors::AppResult;
use crate::models::{DayReport, DayWindow, Horizon, LoadRow, LoadStatus, Resource, Span};
use chrono::{FixedOffset, NaiveDate, TimeDelta, Utc};

/// "Today" and the zone every report is computed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportClock {
    pub today: NaiveDate,
    pub tz: FixedOffset,
}

impl ReportClock {
    pub fn new(today: NaiveDate, tz: FixedOffset) -> Self {
        Self { today, tz }
    }

    pub fn now(tz: FixedOffset) -> Self {
        Self {
            today: Utc::now().with_timezone(&tz).date_naive(),
            tz,
        }
    }

    pub fn day(&self, offset: u32) -> NaiveDate {
        self.today + TimeDelta::days(i64::from(offset))
    }
}

/// Load of one resource over `range`, in percent.
pub fn resource_load<S>(store: &S, resource: &Resource, range: &Span) -> AppResult<i64>
where
    S: SlotStore + ?Sized,
{
    let slots = store.slots_overlapping(resource.reference(), range)?;
    Ok(load_percentage(resource.workday().hours(), &slots, range))
}

pub fn load_row<S>(store: &S, resource: &Resource, clock: &ReportClock) -> AppResult<LoadRow>
where
    S: SlotStore + ?Sized,
{
    let mut pct = [0_i64; 3];
    for (i, horizon) in Horizon::ALL.iter().enumerate() {
        pct[i] = resource_load(store, resource, &horizon.span(clock.today, clock.tz))?;
    }
    let [today, three_days, week] = pct;

    Ok(LoadRow {
        resource: resource.reference(),
        name: resource.name.clone(),
        category: resource.category.clone(),
        today,
        three_days,
        week,
        status: LoadStatus::from_week_load(week),
    })
}

/// One row per resource, in the order given.
/// The first failed read aborts the whole report.
pub fn compute_utilization_report<S>(
    store: &S,
    resources: &[Resource],
    clock: &ReportClock,
) -> AppResult<Vec<LoadRow>>
where
    S: SlotStore + ?Sized,
{
    resources
        .iter()
        .map(|r| load_row(store, r, clock))
        .collect()
}

/// Free/busy split for `day_count` days starting today.
pub fn compute_daily_breakdown<S>(
    store: &S,
    resource: &Resource,
    clock: &ReportClock,
    day_count: u32,
) -> AppResult<Vec<DayReport>>
where
    S: SlotStore + ?Sized,
{
    let workday = resource.workday();

    (0..day_count)
        .map(|offset| {
            let window = DayWindow::new(clock.day(offset), &workday, clock.tz);
            let slots = store.slots_overlapping(resource.reference(), &window.span)?;
            Ok(partition_day(&window, &slots))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use crate::errors::AppError;
    use crate::models::{ResourceKind, ResourceRef, Slot};
    use chrono::{DateTime, NaiveTime};

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(3 * 3600).unwrap()
    }

    fn clock() -> ReportClock {
        ReportClock::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(), tz())
    }

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(&format!("{s}:00+03:00")).unwrap()
    }

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    struct Broken;

    impl SlotStore for Broken {
        fn slots_overlapping(&self, _: ResourceRef, _: &Span) -> AppResult<Vec<Slot>> {
            Err(AppError::DataUnavailable("disk gone".into()))
        }
    }

    #[test]
    fn report_rows_follow_resources() {
        let laser = Resource::new(ResourceKind::Machine, 1, "Laser").with_workday(t(8), t(16));
        let press = Resource::new(ResourceKind::Machine, 2, "Press");
        let paint = Resource::new(ResourceKind::WorkUnit, 1, "Paint booth");

        let store = MemoryStore::new(vec![
            // 8h today on the laser
            Slot::new(1, 1)
                .on_machine(1)
                .between(at("2026-10-19T08:00"), at("2026-10-19T16:00")),
            // 8h in three days on the laser
            Slot::new(2, 1)
                .on_machine(1)
                .between(at("2026-10-22T08:00"), at("2026-10-22T16:00")),
            // same machine id but a work unit: must not leak into the laser
            Slot::new(3, 2)
                .on_work_unit(1)
                .between(at("2026-10-19T08:00"), at("2026-10-19T12:00")),
        ]);

        let rows = compute_utilization_report(&store, &[laser, press, paint], &clock()).unwrap();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].resource, ResourceRef::machine(1));
        assert_eq!((rows[0].today, rows[0].three_days, rows[0].week), (100, 50, 25));
        assert_eq!(rows[0].status, LoadStatus::Green);

        assert_eq!((rows[1].today, rows[1].three_days, rows[1].week), (0, 0, 0));

        assert_eq!(rows[2].resource, ResourceRef::work_unit(1));
        assert_eq!(rows[2].today, 50);
    }

    #[test]
    fn busy_week_turns_red() {
        let m = Resource::new(ResourceKind::Machine, 1, "Bender");
        // 8 days * 8h = 64h available; book 60h
        let store = MemoryStore::new(vec![
            Slot::new(1, 1)
                .on_machine(1)
                .between(at("2026-10-19T00:00"), at("2026-10-21T12:00")),
        ]);
        let row = load_row(&store, &m, &clock()).unwrap();
        assert_eq!(row.week, 94);
        assert_eq!(row.status, LoadStatus::Red);
        assert!(row.today > 100);
    }

    #[test]
    fn storage_failure_is_not_a_zero_report() {
        let m = Resource::new(ResourceKind::Machine, 1, "Laser");
        let err = compute_utilization_report(&Broken, &[m.clone()], &clock()).unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));

        let err = compute_daily_breakdown(&Broken, &m, &clock(), 8).unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
    }

    #[test]
    fn breakdown_walks_consecutive_days() {
        let m = Resource::new(ResourceKind::Machine, 1, "Laser");
        let store = MemoryStore::new(vec![
            Slot::new(1, 1)
                .on_machine(1)
                .between(at("2026-10-20T09:00"), at("2026-10-20T11:00")),
        ]);

        let days = compute_daily_breakdown(&store, &m, &clock(), 8).unwrap();
        assert_eq!(days.len(), 8);
        assert_eq!(days[0].date, clock().today);
        assert_eq!(days[7].date, NaiveDate::from_ymd_opt(2026, 10, 26).unwrap());

        assert!(days[0].busy.is_empty());
        assert_eq!(days[1].busy.len(), 1);
        assert_eq!(days[1].free.len(), 2);
        assert_eq!(days[1].free[0].end, at("2026-10-20T09:00"));
    }

    #[test]
    fn breakdown_uses_configured_hours() {
        let m = Resource::new(ResourceKind::Machine, 1, "Laser").with_workday(t(6), t(14));
        let days = compute_daily_breakdown(&MemoryStore::default(), &m, &clock(), 1).unwrap();
        assert_eq!(days[0].free, vec![Span::new(at("2026-10-19T06:00"), at("2026-10-19T14:00"))]);
    }

    #[test]
    fn recomputing_gives_identical_output() {
        let m = Resource::new(ResourceKind::Machine, 1, "Laser");
        let store = MemoryStore::new(vec![
            Slot::new(1, 1)
                .on_machine(1)
                .between(at("2026-10-19T09:00"), at("2026-10-19T12:00")),
            Slot::new(2, 1)
                .on_machine(1)
                .between(at("2026-10-19T10:00"), at("2026-10-19T11:00")),
        ]);

        let a = compute_utilization_report(&store, std::slice::from_ref(&m), &clock()).unwrap();
        let b = compute_utilization_report(&store, std::slice::from_ref(&m), &clock()).unwrap();
        assert_eq!(a, b);

        let x = compute_daily_breakdown(&store, &m, &clock(), 8).unwrap();
        let y = compute_daily_breakdown(&store, &m, &clock(), 8).unwrap();
        assert_eq!(x, y);
    }
}
