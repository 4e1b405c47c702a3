//! # Slot and Quota Evaluation
//!
//! Decides whether a proposed time slot can be booked, using the bookings
//! already loaded for the selected resource and day plus the user's own
//! bookings.
//!
//! ## Decision policy
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. a resource is selected
//! 2. the time range is valid (`end > start`)
//! 3. the slot does not overlap an existing booking on that resource
//! 4. the slot fits in the user's remaining daily quota
//! 5. the selected day is not in the past
//!
//! These checks are advisory. The backend performs the authoritative ones.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{booking::Booking, time_slot::TimeSlot};

/// Reason a proposed booking was refused before reaching the server.
///
/// The `Display` text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Select a resource.")]
    NoResource,

    #[error("The end time must be after the start time.")]
    InvalidRange,

    #[error("This time slot is already taken. Choose another.")]
    Overlap,

    #[error("You can only book {remaining} more minutes today.")]
    QuotaExceeded { remaining: i64 },

    #[error("Bookings cannot be made on past dates.")]
    PastDate,
}

/// True if `slot` overlaps any booking that belongs to `resource_id`.
///
/// Without a selected resource nothing can conflict.
pub fn has_conflict(bookings: &[Booking], resource_id: Option<i64>, slot: &TimeSlot) -> bool {
    let Some(resource_id) = resource_id else {
        return false;
    };

    bookings
        .iter()
        .filter(|booking| booking.resource_id == resource_id)
        .any(|booking| slot.overlaps(booking.start_clock(), booking.end_clock()))
}

/// Minutes already booked on `day`.
pub fn minutes_used_on(bookings: &[Booking], day: NaiveDate) -> i64 {
    bookings
        .iter()
        .filter(|booking| booking.date() == day)
        .map(|booking| booking.duration_minutes)
        .sum()
}

pub fn remaining_minutes(daily_max: u32, used: i64) -> i64 {
    (i64::from(daily_max) - used).max(0)
}

/// True when `day` lies strictly before `today`.
pub fn is_past_date(day: NaiveDate, today: NaiveDate) -> bool {
    day < today
}

/// Everything the policy needs to judge one proposal.
#[derive(Debug, Clone, Copy)]
pub struct SlotRequest<'a> {
    pub resource_id: Option<i64>,
    pub day: NaiveDate,
    pub today: NaiveDate,
    pub slot: TimeSlot,
    /// Bookings of the selected resource on `day`
    pub resource_bookings: &'a [Booking],
    /// Bookings owned by the current user
    pub user_bookings: &'a [Booking],
    pub daily_max: u32,
}

/// Derived values for a proposal, recomputed whenever an input changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub resource_selected: bool,
    pub valid_range: bool,
    pub duration_minutes: i64,
    pub conflict: bool,
    pub used_minutes: i64,
    pub remaining_minutes: i64,
    pub past_date: bool,
}

impl Evaluation {
    /// Applies the decision policy in order.
    pub fn decide(&self) -> Result<(), Rejection> {
        if !self.resource_selected {
            return Err(Rejection::NoResource);
        }
        if !self.valid_range {
            return Err(Rejection::InvalidRange);
        }
        if self.conflict {
            return Err(Rejection::Overlap);
        }
        if self.duration_minutes > self.remaining_minutes {
            return Err(Rejection::QuotaExceeded {
                remaining: self.remaining_minutes,
            });
        }
        if self.past_date {
            return Err(Rejection::PastDate);
        }
        Ok(())
    }

    pub fn can_book(&self) -> bool {
        self.decide().is_ok()
    }
}

pub fn evaluate(request: &SlotRequest<'_>) -> Evaluation {
    let used_minutes = minutes_used_on(request.user_bookings, request.day);

    Evaluation {
        resource_selected: request.resource_id.is_some(),
        valid_range: request.slot.is_valid(),
        duration_minutes: request.slot.duration_minutes(),
        conflict: has_conflict(request.resource_bookings, request.resource_id, &request.slot),
        used_minutes,
        remaining_minutes: remaining_minutes(request.daily_max, used_minutes),
        past_date: is_past_date(request.day, request.today),
    }
}
