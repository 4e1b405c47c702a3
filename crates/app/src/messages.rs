//! User-facing text for failures.
//!
//! Server and network errors are shown with the server's own message when
//! it sent one, otherwise with a fixed fallback for the operation.

use slotbook_core::errors::BookingError;

pub const RESOURCES_LOAD_FAILED: &str = "Failed to load resources. Check that the backend is running.";
pub const CREATE_FAILED: &str = "Failed to create booking.";
pub const CANCEL_FAILED: &str = "Failed to cancel booking.";
pub const BOOKING_CREATED: &str = "Booking created successfully!";
pub const BOOKING_CANCELLED: &str = "Booking cancelled.";

pub const EMAIL_REQUIRED: &str = "Please enter your email.";
pub const NAME_REQUIRED: &str = "Please enter your name.";
pub const LOGIN_FAILED: &str = "User not found. Try registering.";
pub const REGISTER_FAILED: &str = "Registration failed. Is the email already in use?";

pub fn booking_not_found(booking_id: i64) -> String {
    format!("Booking {} was not found.", booking_id)
}

/// Server-provided message if present, else `fallback`.
pub fn user_message(err: &BookingError, fallback: &str) -> String {
    err.server_message()
        .filter(|message| !message.trim().is_empty())
        .unwrap_or(fallback)
        .to_string()
}
