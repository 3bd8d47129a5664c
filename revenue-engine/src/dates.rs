//! Parsing of window boundaries typed into the dashboard
//!
//! Accepts RFC 3339 timestamps as-is. A bare `YYYY-MM-DD` date is widened to
//! cover the whole day: a start boundary becomes midnight UTC and an end
//! boundary becomes the last representable instant of that day, so
//! `?start=2025-12-01&end=2025-12-31` includes everything dated December 31st.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::error::InvalidDateError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which side of the window a boundary sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryEdge {
    Start,
    End,
}

pub fn parse_boundary(
    field: &str,
    raw: &str,
    edge: BoundaryEdge,
) -> Result<DateTime<Utc>, InvalidDateError> {
    let trimmed = raw.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }

    let invalid = || InvalidDateError {
        field: field.to_string(),
        input: raw.to_string(),
    };

    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| invalid())?;

    match edge {
        BoundaryEdge::Start => Ok(date.and_time(NaiveTime::MIN).and_utc()),
        BoundaryEdge::End => end_of_day(date).ok_or_else(invalid),
    }
}

/// Last nanosecond of `date`
fn end_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .checked_add_signed(Duration::days(1) - Duration::nanoseconds(1))
}

pub fn parse_window_start(raw: &str) -> Result<DateTime<Utc>, InvalidDateError> {
    parse_boundary("start", raw, BoundaryEdge::Start)
}

pub fn parse_window_end(raw: &str) -> Result<DateTime<Utc>, InvalidDateError> {
    parse_boundary("end", raw, BoundaryEdge::End)
}

/// Parse optional raw boundaries, keeping absent ones absent
pub fn parse_optional_window(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>), InvalidDateError> {
    let start = start.map(parse_window_start).transpose()?;
    let end = end.map(parse_window_end).transpose()?;
    Ok((start, end))
}
