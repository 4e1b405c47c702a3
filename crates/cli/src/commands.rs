//! Command line surface.
//!
//! Each subcommand maps onto one action of the booking screens. Times are
//! restricted to the same quarter-hour options the calendar offers.

use chrono::{NaiveDate, NaiveTime, Timelike};
use clap::{Parser, Subcommand};
use slotbook_core::{
    calendar::{HOUR_OPTIONS, MINUTE_OPTIONS},
    time::{parse_clock, parse_date_string},
};

/// Book shared resources from the terminal
#[derive(Parser, Debug)]
#[command(name = "slotbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log in with the email of an existing account
    Login { email: String },
    /// Create an account and log in
    Register { name: String, email: String },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List bookable resources
    Resources,
    /// Show a month with the bookings of one resource on one day
    Calendar {
        /// Month to display (YYYY-MM)
        #[arg(long, value_parser = parse_month)]
        month: Option<NaiveDate>,
        /// Resource ID (defaults to the first resource)
        #[arg(short, long)]
        resource: Option<i64>,
        /// Day to show bookings for (YYYY-MM-DD, defaults to today)
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Book a time slot
    Book {
        /// Start time (HH:MM)
        #[arg(long, value_parser = parse_slot_time)]
        start: NaiveTime,
        /// End time (HH:MM)
        #[arg(long, value_parser = parse_slot_time)]
        end: NaiveTime,
        /// Resource ID (defaults to the first resource)
        #[arg(short, long)]
        resource: Option<i64>,
        /// Day to book (YYYY-MM-DD, defaults to today)
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Cancel one of your bookings
    Cancel { booking_id: i64 },
    /// List your bookings
    Mine,
    /// Show which screen a path leads to
    Open { path: String },
}

pub fn parse_month(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .map_err(|_| format!("invalid month '{}', expected YYYY-MM", value))
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    parse_date_string(value).map_err(|e| e.to_string())
}

/// Parses `HH:MM` and checks it against the selectable hours and minutes.
pub fn parse_slot_time(value: &str) -> Result<NaiveTime, String> {
    let time = parse_clock(value).map_err(|e| e.to_string())?;

    if !HOUR_OPTIONS.contains(&time.hour()) || !MINUTE_OPTIONS.contains(&time.minute()) {
        return Err(format!(
            "'{}' is not selectable; use {:02}:00 to {:02}:45 in 15 minute steps",
            value,
            HOUR_OPTIONS.start(),
            HOUR_OPTIONS.end()
        ));
    }

    Ok(time)
}
