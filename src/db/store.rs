use crate::core::store::SlotStore;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{ResourceRef, Slot, Span};

impl SlotStore for DbPool {
    /// Any failure here means the report cannot be trusted, so it is
    /// surfaced as `DataUnavailable` instead of an empty result.
    fn slots_overlapping(&self, resource: ResourceRef, range: &Span) -> AppResult<Vec<Slot>> {
        let slots = queries::slots_overlapping(&self.conn, resource, range)
            .map_err(AppError::unavailable)?;

        // text comparison in SQL is only a prefilter
        Ok(slots.into_iter().filter(|s| s.overlaps(range)).collect())
    }
}
