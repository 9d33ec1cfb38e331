pub mod interval;
pub mod order;
pub mod report;
pub mod resource;
pub mod slot;

pub use interval::{BusyInterval, DayWindow, Span, Stamp};
pub use order::Order;
pub use report::{DayReport, Horizon, LoadRow, LoadStatus};
pub use resource::{Resource, ResourceKind, ResourceRef, Workday};
pub use slot::Slot;
