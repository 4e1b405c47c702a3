//! # Slotbook Client
//!
//! Remote data access for the booking API. Each call is a single
//! request/response over HTTP with JSON bodies: no retries, no caching and
//! no batching. Failures are returned as [`BookingError`] values and the
//! caller decides what to show the user.
//!
//! Consumers depend on the [`BookingApi`] and [`UserApi`] traits so that the
//! HTTP implementations can be swapped for the mocks in [`mock`].
//!
//! [`BookingError`]: slotbook_core::errors::BookingError

pub mod bookings;
pub mod config;
pub mod mock;
pub mod users;

mod http;

use async_trait::async_trait;
use chrono::NaiveDate;
use slotbook_core::{
    errors::BookingResult,
    models::{
        booking::{Booking, CreateBookingRequest},
        resource::Resource,
        user::{CreateUserRequest, LoginRequest, User},
    },
};

pub use bookings::BookingClient;
pub use config::ClientConfig;
pub use users::UserClient;

/// Booking and resource endpoints.
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// `GET /booking`
    async fn list_bookings(&self) -> BookingResult<Vec<Booking>>;

    /// `GET /booking/resource/{id}`, optionally filtered with `?date=YYYY-MM-DD`
    async fn bookings_for_resource(
        &self,
        resource_id: i64,
        date: Option<NaiveDate>,
    ) -> BookingResult<Vec<Booking>>;

    /// `GET /booking/user/{id}`
    async fn bookings_for_user(&self, user_id: i64) -> BookingResult<Vec<Booking>>;

    /// `GET /booking/{id}`
    async fn get_booking(&self, id: i64) -> BookingResult<Booking>;

    /// `POST /booking`
    async fn create_booking(&self, request: CreateBookingRequest) -> BookingResult<Booking>;

    /// `DELETE /booking/{id}`
    async fn delete_booking(&self, id: i64) -> BookingResult<()>;

    /// `GET /resource`
    async fn list_resources(&self) -> BookingResult<Vec<Resource>>;

    /// `GET /resource/{id}`
    async fn get_resource(&self, id: i64) -> BookingResult<Resource>;
}

/// Account endpoints.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// `POST /user/login`; fails when no account matches the email
    async fn login(&self, request: LoginRequest) -> BookingResult<User>;

    /// `POST /user/register`; fails when the email is already registered
    async fn register(&self, request: CreateUserRequest) -> BookingResult<User>;
}
