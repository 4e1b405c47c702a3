//! # Slotbook Core
//!
//! Domain types and pure logic shared by every Slotbook crate:
//!
//! - **Models**: users, resources, bookings and time slots as exchanged with the API
//! - **Time**: conversions between dates, clock times and wire timestamps
//! - **Evaluator**: slot conflict detection, daily quota accounting and the booking policy
//! - **Calendar**: month grid computation and navigation
//! - **Errors**: the error taxonomy used across the workspace

pub mod calendar;
pub mod errors;
pub mod evaluator;
pub mod models;
pub mod time;
