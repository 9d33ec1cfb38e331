pub mod calculator;
pub mod log;
pub mod placement;
pub mod report;
pub mod store;

pub use report::{ReportClock, compute_daily_breakdown, compute_utilization_report};
pub use store::{MemoryStore, SlotStore};
