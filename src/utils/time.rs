//! Time utilities: parsing HH:MM, fixed-offset time zones, day bounds
//! and user supplied timestamps.

use crate::errors::{AppError, AppResult};
use crate::models::interval::Stamp;
use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone,
    Utc,
};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Resolve the configured report time zone.
///
/// Accepts `local` (the system offset right now), `Z`/`UTC`, or a fixed
/// offset such as `+02:00`, `-0530`.
pub fn parse_timezone(s: &str) -> AppResult<FixedOffset> {
    let raw = s.trim();

    if raw.eq_ignore_ascii_case("local") {
        return Ok(Local::now().offset().fix());
    }
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    let (sign, rest) = match raw.as_bytes().first() {
        Some(b'+') => (1, &raw[1..]),
        Some(b'-') => (-1, &raw[1..]),
        _ => return Err(AppError::InvalidTimezone(s.to_string())),
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::InvalidTimezone(s.to_string()));
    }

    let hours: i32 = digits[0..2]
        .parse()
        .map_err(|_| AppError::InvalidTimezone(s.to_string()))?;
    let minutes: i32 = digits[2..4]
        .parse()
        .map_err(|_| AppError::InvalidTimezone(s.to_string()))?;

    if minutes >= 60 {
        return Err(AppError::InvalidTimezone(s.to_string()));
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| AppError::InvalidTimezone(s.to_string()))
}

/// Attach the fixed offset to a wall-clock datetime.
/// A fixed offset has no gaps or folds, so this never fails.
pub fn localize(tz: FixedOffset, naive: NaiveDateTime) -> Stamp {
    let utc = naive - TimeDelta::seconds(i64::from(tz.local_minus_utc()));
    tz.from_utc_datetime(&utc)
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate, tz: FixedOffset) -> Stamp {
    localize(tz, date.and_time(NaiveTime::MIN))
}

/// Last representable instant of `date` (23:59:59.999999).
pub fn end_of_day(date: NaiveDate, tz: FixedOffset) -> Stamp {
    start_of_day(date, tz) + TimeDelta::days(1) - TimeDelta::microseconds(1)
}

/// Parse a timestamp typed on the command line.
///
/// `YYYY-MM-DD HH:MM` and `YYYY-MM-DDTHH:MM` are read in `tz`;
/// full RFC 3339 strings keep their own offset and are converted to `tz`.
pub fn parse_timestamp(s: &str, tz: FixedOffset) -> AppResult<Stamp> {
    let raw = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&tz));
    }

    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(localize(tz, naive));
        }
    }

    Err(AppError::InvalidTimestamp(s.to_string()))
}

pub fn parse_optional_timestamp(
    input: Option<&String>,
    tz: FixedOffset,
) -> AppResult<Option<Stamp>> {
    input.map(|s| parse_timestamp(s, tz)).transpose()
}

/// Wall-clock `HH:MM` of an instant in `tz`.
pub fn clock(ts: &Stamp, tz: FixedOffset) -> String {
    ts.with_timezone(&tz).format("%H:%M").to_string()
}
