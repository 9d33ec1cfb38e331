use super::slot::Slot;
use crate::errors::AppError;
use chrono::{NaiveTime, TimeDelta};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hours credited per day when a resource has no working window configured.
pub const DEFAULT_WORKDAY_HOURS: f64 = 8.0;

const SECONDS_PER_DAY: i64 = 86_400;

/// What can be booked by a production slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Machine,
    #[value(name = "unit", alias = "work-unit")]
    WorkUnit,
}

impl ResourceKind {
    pub fn code(&self) -> &'static str {
        match self {
            ResourceKind::Machine => "machine",
            ResourceKind::WorkUnit => "unit",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "machine" | "m" => Some(ResourceKind::Machine),
            "unit" | "work-unit" | "work_unit" | "u" => Some(ResourceKind::WorkUnit),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Machine => "Machine",
            ResourceKind::WorkUnit => "Work unit",
        }
    }

    /// Table holding resources of this kind.
    pub fn table(&self) -> &'static str {
        match self {
            ResourceKind::Machine => "machines",
            ResourceKind::WorkUnit => "work_units",
        }
    }

    /// Foreign key on `slots` that points at resources of this kind.
    pub fn slot_column(&self) -> &'static str {
        match self {
            ResourceKind::Machine => "machine_id",
            ResourceKind::WorkUnit => "work_unit_id",
        }
    }

    /// The resource of this kind a slot is assigned to, if any.
    pub fn owner_of(&self, slot: &Slot) -> Option<i64> {
        match self {
            ResourceKind::Machine => slot.machine_id,
            ResourceKind::WorkUnit => slot.work_unit_id,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// `kind:id`, e.g. `machine:3` or `unit:1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub id: i64,
}

impl ResourceRef {
    pub fn new(kind: ResourceKind, id: i64) -> Self {
        Self { kind, id }
    }

    pub fn machine(id: i64) -> Self {
        Self::new(ResourceKind::Machine, id)
    }

    pub fn work_unit(id: i64) -> Self {
        Self::new(ResourceKind::WorkUnit, id)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.code(), self.id)
    }
}

impl FromStr for ResourceRef {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| AppError::InvalidResource(format!("expected kind:id, got '{s}'")))?;

        let kind = ResourceKind::from_code(kind)
            .ok_or_else(|| AppError::InvalidResource(format!("unknown kind '{kind}'")))?;
        let id: i64 = id
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidResource(format!("invalid id '{id}'")))?;

        Ok(Self { kind, id })
    }
}

/// A machine or a work unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub id: i64,
    pub kind: ResourceKind,
    pub name: String,
    pub category: String,
    pub workday_start: Option<NaiveTime>,
    pub workday_end: Option<NaiveTime>,
    pub comment: String,
}

impl Resource {
    pub fn new(kind: ResourceKind, id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            category: "other".to_string(),
            workday_start: None,
            workday_end: None,
            comment: String::new(),
        }
    }

    pub fn with_workday(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.workday_start = Some(start);
        self.workday_end = Some(end);
        self
    }

    pub fn reference(&self) -> ResourceRef {
        ResourceRef::new(self.kind, self.id)
    }

    pub fn workday(&self) -> Workday {
        Workday::from_bounds(self.workday_start, self.workday_end)
    }
}

/// Working window of a resource for any given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workday {
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// false when the 08:00–17:00 fallback is in use
    pub configured: bool,
}

impl Workday {
    pub fn fallback() -> Self {
        Self {
            start: NaiveTime::MIN + TimeDelta::hours(8),
            end: NaiveTime::MIN + TimeDelta::hours(17),
            configured: false,
        }
    }

    /// Both bounds are needed; a half-configured resource uses the fallback.
    pub fn from_bounds(start: Option<NaiveTime>, end: Option<NaiveTime>) -> Self {
        match (start, end) {
            (Some(start), Some(end)) => Self {
                start,
                end,
                configured: true,
            },
            _ => Self::fallback(),
        }
    }

    /// Hours credited per day by the load report.
    ///
    /// Only the time-of-day difference matters. It wraps around midnight,
    /// so 22:00–06:00 is 8h and an equal start and end is 0h.
    /// The fallback window is credited as a flat 8h.
    pub fn hours(&self) -> f64 {
        if !self.configured {
            return DEFAULT_WORKDAY_HOURS;
        }

        let seconds = (self.end - self.start)
            .num_seconds()
            .rem_euclid(SECONDS_PER_DAY);
        seconds as f64 / 3600.0
    }
}
