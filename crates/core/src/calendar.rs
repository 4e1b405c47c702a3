//! Month grid and navigation for the booking calendar.

use chrono::{Datelike, Months, NaiveDate};

use crate::models::booking::Booking;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Selectable start/end hours
pub const HOUR_OPTIONS: std::ops::RangeInclusive<u32> = 6..=22;
/// Selectable start/end minutes
pub const MINUTE_OPTIONS: [u32; 4] = [0, 15, 30, 45];

/// One calendar row, Sunday first. Cells outside the month are `None`.
pub type Week = [Option<NaiveDate>; 7];

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn previous_month(month: NaiveDate) -> NaiveDate {
    first_of_month(month)
        .checked_sub_months(Months::new(1))
        .unwrap_or(month)
}

pub fn next_month(month: NaiveDate) -> NaiveDate {
    first_of_month(month)
        .checked_add_months(Months::new(1))
        .unwrap_or(month)
}

pub fn days_in_month(month: NaiveDate) -> u32 {
    let first = first_of_month(month);
    next_month(first).signed_duration_since(first).num_days() as u32
}

/// Builds the grid of weeks covering the month that contains `month`.
pub fn month_grid(month: NaiveDate) -> Vec<Week> {
    let first = first_of_month(month);
    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut weeks = Vec::new();
    let mut current: Week = [None; 7];
    let mut cell = leading;

    for date in first.iter_days().take(days_in_month(first) as usize) {
        current[cell] = Some(date);
        cell += 1;
        if cell == 7 {
            weeks.push(current);
            current = [None; 7];
            cell = 0;
        }
    }

    if cell > 0 {
        weeks.push(current);
    }

    weeks
}

/// e.g. "January 2026"
pub fn month_label(month: NaiveDate) -> String {
    month.format("%B %Y").to_string()
}

/// e.g. "11 January 2026"
pub fn long_date_label(date: NaiveDate) -> String {
    format!("{} {}", date.day(), date.format("%B %Y"))
}

pub fn has_bookings_on(bookings: &[Booking], date: NaiveDate) -> bool {
    bookings.iter().any(|booking| booking.date() == date)
}
