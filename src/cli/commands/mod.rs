pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod order;
pub mod report;
pub mod resource;
pub mod slot;

use crate::config::Config;
use crate::core::ReportClock;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// Open the configured database, applying any pending migration.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

pub(crate) fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Clock for a report: the configured zone, and `--today` if given.
pub(crate) fn report_clock(cfg: &Config, today: Option<&String>) -> AppResult<ReportClock> {
    let tz = cfg.tz()?;
    match today {
        Some(d) => Ok(ReportClock::new(parse_date(d)?, tz)),
        None => Ok(ReportClock::now(tz)),
    }
}
