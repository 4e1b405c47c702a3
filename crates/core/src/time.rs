//! # Time Utilities
//!
//! Conversions between calendar dates, clock times and the wire timestamp
//! format exchanged with the booking API.
//!
//! The API speaks local wall-clock timestamps without any timezone suffix,
//! e.g. `2026-01-11T14:30:00`. Clock times selected by the user are plain
//! `HH:MM` strings.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::errors::{BookingError, BookingResult};

/// Timestamp layout used on the wire (no offset, no fractional seconds)
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Layout accepted when reading timestamps coming from the server
const WIRE_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const CLOCK_FORMAT: &str = "%H:%M";

/// Parses an `HH:MM` clock time.
pub fn parse_clock(value: &str) -> BookingResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), CLOCK_FORMAT)
        .map_err(|_| BookingError::Validation(format!("Invalid clock time '{}', expected HH:MM", value)))
}

/// Formats a clock time as `HH:MM`.
pub fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

/// Combines a calendar date with a clock time; seconds are always zero.
pub fn combine(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// Combines a date with an `HH:MM` clock time into a wire timestamp.
///
/// ```
/// use chrono::NaiveDate;
/// use slotbook_core::time::combine_date_and_time;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
/// assert_eq!(combine_date_and_time(date, "14:30").unwrap(), "2026-01-11T14:30:00");
/// ```
pub fn combine_date_and_time(date: NaiveDate, time: &str) -> BookingResult<String> {
    let time = parse_clock(time)?;
    Ok(to_wire_string(combine(date, time)))
}

pub fn to_wire_string(value: NaiveDateTime) -> String {
    value.format(WIRE_FORMAT).to_string()
}

pub fn parse_wire(value: &str) -> BookingResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), WIRE_PARSE_FORMAT)
        .map_err(|_| BookingError::Validation(format!("Invalid timestamp '{}'", value)))
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date_string(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date_string(value: &str) -> BookingResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| BookingError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", value)))
}

/// Returns the date portion of a wire timestamp.
pub fn extract_date(value: &str) -> &str {
    value.split('T').next().unwrap_or(value)
}

/// Returns the `HH:MM` portion of a wire timestamp.
pub fn extract_time(value: &str) -> BookingResult<String> {
    parse_wire(value).map(|parsed| format_clock(parsed.time()))
}

/// True when both values fall on the same calendar day.
pub fn is_same_day<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Whole minutes from `start` to `end`; negative when `end` comes first.
pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

/// Serde adapter for wire timestamps.
pub mod wire_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::to_wire_string(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_wire(&raw).map_err(serde::de::Error::custom)
    }
}
