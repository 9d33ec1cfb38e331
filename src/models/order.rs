use chrono::NaiveDate;
use serde::Serialize;

/// The part of a customer order the scheduler cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: i64,
    pub title: String,
    pub deadline: Option<NaiveDate>,
    pub created_at: String,
}
