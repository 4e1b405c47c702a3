use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::errors::BookingResult;
use crate::time::{format_clock, minutes_between, parse_clock};

/// A proposed start/end clock-time pair, not tied to a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Builds a slot from two `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> BookingResult<Self> {
        Ok(Self::new(parse_clock(start)?, parse_clock(end)?))
    }

    /// Zero-length and inverted ranges are invalid.
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Length in minutes, floored at zero.
    pub fn duration_minutes(&self) -> i64 {
        minutes_between(self.start, self.end).max(0)
    }

    /// Half-open overlap: touching endpoints do not overlap.
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start < end && self.end > start
    }

    pub fn label(&self) -> String {
        format!("{}–{}", format_clock(self.start), format_clock(self.end))
    }
}
