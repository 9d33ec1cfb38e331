// src/export/model.rs

use crate::models::{DayReport, LoadRow, Span, Stamp};
use chrono::{FixedOffset, SecondsFormat};
use serde::Serialize;

/// Flat row of the load report.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct LoadExport {
    pub kind: String,
    pub resource_id: i64,
    pub name: String,
    pub category: String,
    pub today_pct: i64,
    pub three_day_pct: i64,
    pub week_pct: i64,
    pub status: String,
}

impl From<&LoadRow> for LoadExport {
    fn from(r: &LoadRow) -> Self {
        Self {
            kind: r.resource.kind.code().to_string(),
            resource_id: r.resource.id,
            name: r.name.clone(),
            category: r.category.clone(),
            today_pct: r.today,
            three_day_pct: r.three_days,
            week_pct: r.week,
            status: r.status.as_str().to_string(),
        }
    }
}

/// One busy or free stretch of a day. Free rows carry no slot or order.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ScheduleExport {
    pub resource: String,
    pub date: String,
    pub state: String,
    pub start: String,
    pub end: String,
    pub minutes: i64,
    pub slot_id: Option<i64>,
    pub order_id: Option<i64>,
    pub order_title: Option<String>,
}

fn stamp(ts: &Stamp, tz: FixedOffset) -> String {
    ts.with_timezone(&tz).to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn free_row(resource: &str, day: &DayReport, span: &Span, tz: FixedOffset) -> ScheduleExport {
    ScheduleExport {
        resource: resource.to_string(),
        date: day.date.format("%Y-%m-%d").to_string(),
        state: "free".to_string(),
        start: stamp(&span.start, tz),
        end: stamp(&span.end, tz),
        minutes: span.seconds() / 60,
        slot_id: None,
        order_id: None,
        order_title: None,
    }
}

/// Rows of every day: busy stretches first, in report order, then free ones.
pub(crate) fn schedule_rows(
    resource: &str,
    days: &[DayReport],
    tz: FixedOffset,
) -> Vec<ScheduleExport> {
    let mut out = Vec::new();

    for day in days {
        for b in &day.busy {
            out.push(ScheduleExport {
                state: "busy".to_string(),
                slot_id: Some(b.slot_id),
                order_id: Some(b.order_id),
                order_title: b.order_title.clone(),
                ..free_row(resource, day, &b.span, tz)
            });
        }
        out.extend(day.free.iter().map(|f| free_row(resource, day, f, tz)));
    }

    out
}
