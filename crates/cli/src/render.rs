//! Plain-text rendering of the booking screen.

use chrono::{Datelike, NaiveDate};
use slotbook_client::BookingApi;
use slotbook_core::{
    calendar::WEEKDAY_LABELS,
    evaluator::Evaluation,
    models::{booking::Booking, resource::Resource, user::User},
    time::{format_clock, format_date_string},
};
use slotbook_app::BookingPage;

const CELL_WIDTH: usize = 5;

/// How a calendar day is highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayMarks {
    pub selected: bool,
    pub today: bool,
    pub booked: bool,
}

/// One calendar cell: `[11]` selected, `(11)` today, trailing `*` when the
/// selected resource has bookings on that day.
pub fn day_cell(date: NaiveDate, marks: DayMarks) -> String {
    let (open, close) = if marks.selected {
        ('[', ']')
    } else if marks.today {
        ('(', ')')
    } else {
        (' ', ' ')
    };
    let booked = if marks.booked { '*' } else { ' ' };
    format!("{}{:>2}{}{}", open, date.day(), close, booked)
}

/// The month grid of the page, Sunday first.
pub fn calendar<B: BookingApi>(page: &BookingPage<B>) -> String {
    let derived = page.derived();
    let mut lines = vec![derived.month_label.clone()];

    lines.push(
        WEEKDAY_LABELS
            .iter()
            .map(|label| format!("{:<width$}", label, width = CELL_WIDTH))
            .collect::<String>()
            .trim_end()
            .to_string(),
    );

    for week in &derived.calendar {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                Some(date) => day_cell(
                    *date,
                    DayMarks {
                        selected: page.is_selected_date(*date),
                        today: page.is_today(*date),
                        booked: page.has_bookings_on(*date),
                    },
                ),
                None => " ".repeat(CELL_WIDTH),
            })
            .collect();
        lines.push(row.trim_end().to_string());
    }

    lines.join("\n")
}

pub fn booking_line(booking: &Booking) -> String {
    format!(
        "#{:<5} {}  {}–{}  {:<12} {:<12} {} min",
        booking.id,
        format_date_string(booking.date()),
        format_clock(booking.start_clock()),
        format_clock(booking.end_clock()),
        booking.resource_label(),
        booking.user_label(),
        booking.duration_minutes
    )
}

/// A booking list, or `empty` when there is nothing to show.
pub fn bookings(bookings: &[Booking], empty: &str) -> String {
    if bookings.is_empty() {
        return empty.to_string();
    }
    bookings.iter().map(booking_line).collect::<Vec<_>>().join("\n")
}

pub fn resources(resources: &[Resource], selected: Option<i64>) -> String {
    if resources.is_empty() {
        return "No resources available.".to_string();
    }

    resources
        .iter()
        .map(|resource| {
            let marker = if Some(resource.id) == selected { '*' } else { ' ' };
            format!(
                "{} #{:<4} {} ({} min slots)",
                marker,
                resource.id,
                resource.display_name(),
                resource.interval_minutes
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn quota(evaluation: &Evaluation, user: &User) -> String {
    format!(
        "Booked {} of {} minutes, {} remaining.",
        evaluation.used_minutes,
        user.daily_quota(),
        evaluation.remaining_minutes
    )
}

pub fn whoami(user: &User) -> String {
    match &user.email {
        Some(email) => format!("{} <{}>, daily limit {} minutes", user.display_name(), email, user.daily_quota()),
        None => format!("{}, daily limit {} minutes", user.display_name(), user.daily_quota()),
    }
}
