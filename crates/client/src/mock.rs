//! Mock API implementations for testing code that depends on the clients.

use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use slotbook_core::{
    errors::BookingResult,
    models::{
        booking::{Booking, CreateBookingRequest},
        resource::Resource,
        user::{CreateUserRequest, LoginRequest, User},
    },
};

use crate::{BookingApi, UserApi};

mock! {
    pub BookingService {}

    #[async_trait]
    impl BookingApi for BookingService {
        async fn list_bookings(&self) -> BookingResult<Vec<Booking>>;

        async fn bookings_for_resource(
            &self,
            resource_id: i64,
            date: Option<NaiveDate>,
        ) -> BookingResult<Vec<Booking>>;

        async fn bookings_for_user(&self, user_id: i64) -> BookingResult<Vec<Booking>>;

        async fn get_booking(&self, id: i64) -> BookingResult<Booking>;

        async fn create_booking(&self, request: CreateBookingRequest) -> BookingResult<Booking>;

        async fn delete_booking(&self, id: i64) -> BookingResult<()>;

        async fn list_resources(&self) -> BookingResult<Vec<Resource>>;

        async fn get_resource(&self, id: i64) -> BookingResult<Resource>;
    }
}

mock! {
    pub UserService {}

    #[async_trait]
    impl UserApi for UserService {
        async fn login(&self, request: LoginRequest) -> BookingResult<User>;

        async fn register(&self, request: CreateUserRequest) -> BookingResult<User>;
    }
}
