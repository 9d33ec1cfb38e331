//! Where slots come from.
//!
//! Reports only ever ask one question: which slots of this resource
//! overlap this range. `MemoryStore` answers it from a plain list,
//! `DbPool` answers it from SQLite (see `db::store`).

use crate::errors::AppResult;
use crate::models::{ResourceRef, Slot, Span};

pub trait SlotStore {
    /// Slots assigned to `resource` that strictly overlap `range`,
    /// in storage order. Slots without both bounds are never returned.
    fn slots_overlapping(&self, resource: ResourceRef, range: &Span) -> AppResult<Vec<Slot>>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Vec<Slot>,
}

impl MemoryStore {
    pub fn new(slots: Vec<Slot>) -> Self {
        Self { slots }
    }
}

impl SlotStore for MemoryStore {
    fn slots_overlapping(&self, resource: ResourceRef, range: &Span) -> AppResult<Vec<Slot>> {
        Ok(self
            .slots
            .iter()
            .filter(|s| s.belongs_to(resource) && s.overlaps(range))
            .cloned()
            .collect())
    }
}
