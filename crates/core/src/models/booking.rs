use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::time::wire_format;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub user_name: Option<String>,
    pub resource_id: i64,
    pub resource_name: Option<String>,
    #[serde(with = "wire_format")]
    pub start_time: NaiveDateTime,
    #[serde(with = "wire_format")]
    pub end_time: NaiveDateTime,
    pub duration_minutes: i64,
}

impl Booking {
    /// Calendar day the booking starts on.
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    pub fn start_clock(&self) -> NaiveTime {
        self.start_time.time()
    }

    pub fn end_clock(&self) -> NaiveTime {
        self.end_time.time()
    }

    pub fn user_label(&self) -> String {
        self.user_name.clone().unwrap_or_else(|| format!("#{}", self.user_id))
    }

    pub fn resource_label(&self) -> String {
        self.resource_name
            .clone()
            .unwrap_or_else(|| format!("#{}", self.resource_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub user_id: i64,
    pub resource_id: i64,
    #[serde(with = "wire_format")]
    pub start_time: NaiveDateTime,
    #[serde(with = "wire_format")]
    pub end_time: NaiveDateTime,
}

/// Orders bookings by start time, the order every list is shown in.
pub fn sort_by_start(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| a.start_time.cmp(&b.start_time));
}
