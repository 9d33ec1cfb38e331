use super::interval::{Span, Stamp};
use super::resource::ResourceRef;
use serde::Serialize;

/// A booking of a machine and/or work unit by an order.
///
/// Both bounds are optional while a slot is being planned. A slot missing
/// either bound never counts as busy time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub id: i64,
    pub order_id: i64,
    pub order_title: Option<String>,
    pub machine_id: Option<i64>,
    pub work_unit_id: Option<i64>,
    pub start: Option<Stamp>,
    pub end: Option<Stamp>,
    pub comment: String,
}

impl Slot {
    pub fn new(id: i64, order_id: i64) -> Self {
        Self {
            id,
            order_id,
            order_title: None,
            machine_id: None,
            work_unit_id: None,
            start: None,
            end: None,
            comment: String::new(),
        }
    }

    pub fn on_machine(mut self, machine_id: i64) -> Self {
        self.machine_id = Some(machine_id);
        self
    }

    pub fn on_work_unit(mut self, work_unit_id: i64) -> Self {
        self.work_unit_id = Some(work_unit_id);
        self
    }

    pub fn on(self, resource: ResourceRef) -> Self {
        match resource.kind {
            super::ResourceKind::Machine => self.on_machine(resource.id),
            super::ResourceKind::WorkUnit => self.on_work_unit(resource.id),
        }
    }

    pub fn between(mut self, start: Stamp, end: Stamp) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn bounds(&self) -> Option<(Stamp, Stamp)> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        }
    }

    pub fn belongs_to(&self, resource: ResourceRef) -> bool {
        resource.kind.owner_of(self) == Some(resource.id)
    }

    /// Strict overlap with `range`; unbounded slots never overlap.
    pub fn overlaps(&self, range: &Span) -> bool {
        self.bounds()
            .is_some_and(|(start, end)| range.overlaps(start, end))
    }

    /// Human readable location, e.g. `machine:2 + unit:1`.
    pub fn location(&self) -> String {
        match (self.machine_id, self.work_unit_id) {
            (Some(m), Some(u)) => {
                format!("{} + {}", ResourceRef::machine(m), ResourceRef::work_unit(u))
            }
            (Some(m), None) => ResourceRef::machine(m).to_string(),
            (None, Some(u)) => ResourceRef::work_unit(u).to_string(),
            (None, None) => "--".to_string(),
        }
    }
}
