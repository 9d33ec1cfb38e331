use super::interval::{BusyInterval, Span};
use super::resource::ResourceRef;
use crate::utils::time::{end_of_day, start_of_day};
use chrono::{FixedOffset, NaiveDate, TimeDelta};
use serde::Serialize;

/// Week-load thermometer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Green,
    Yellow,
    Red,
}

impl LoadStatus {
    /// `< 70` green, `70..=89` yellow, `>= 90` red.
    pub fn from_week_load(pct: i64) -> Self {
        if pct < 70 {
            LoadStatus::Green
        } else if pct < 90 {
            LoadStatus::Yellow
        } else {
            LoadStatus::Red
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Green => "green",
            LoadStatus::Yellow => "yellow",
            LoadStatus::Red => "red",
        }
    }
}

/// Rolling windows of the load report, all starting at midnight today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    Today,
    ThreeDays,
    Week,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::Today, Horizon::ThreeDays, Horizon::Week];

    pub fn days_ahead(&self) -> i64 {
        match self {
            Horizon::Today => 0,
            Horizon::ThreeDays => 3,
            Horizon::Week => 7,
        }
    }

    /// `[midnight today, end of today + days_ahead]`
    pub fn span(&self, today: NaiveDate, tz: FixedOffset) -> Span {
        let last = today + TimeDelta::days(self.days_ahead());
        Span::new(start_of_day(today, tz), end_of_day(last, tz))
    }
}

/// One line of the load report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadRow {
    pub resource: ResourceRef,
    pub name: String,
    pub category: String,
    pub today: i64,
    pub three_days: i64,
    pub week: i64,
    pub status: LoadStatus,
}

/// Free/busy split of one working day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayReport {
    pub date: NaiveDate,
    pub window: Span,
    pub busy: Vec<BusyInterval>,
    pub free: Vec<Span>,
}

impl DayReport {
    pub fn free_minutes(&self) -> i64 {
        self.free.iter().map(|s| s.seconds()).sum::<i64>() / 60
    }

    pub fn busy_minutes(&self) -> i64 {
        self.busy.iter().map(|b| b.span.seconds()).sum::<i64>() / 60
    }
}
