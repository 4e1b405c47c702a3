use async_trait::async_trait;
use chrono::NaiveDate;
use slotbook_core::{
    errors::BookingResult,
    models::{
        booking::{Booking, CreateBookingRequest},
        resource::Resource,
    },
    time::format_date_string,
};
use tracing::info;

use crate::{config::ClientConfig, http::HttpTransport, BookingApi};

/// HTTP implementation of [`BookingApi`].
#[derive(Debug, Clone)]
pub struct BookingClient {
    transport: HttpTransport,
}

impl BookingClient {
    pub fn new(config: &ClientConfig) -> BookingResult<Self> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
        })
    }
}

#[async_trait]
impl BookingApi for BookingClient {
    async fn list_bookings(&self) -> BookingResult<Vec<Booking>> {
        self.transport.get("/booking", &[]).await
    }

    async fn bookings_for_resource(
        &self,
        resource_id: i64,
        date: Option<NaiveDate>,
    ) -> BookingResult<Vec<Booking>> {
        let query: Vec<(&str, String)> = date
            .map(|date| vec![("date", format_date_string(date))])
            .unwrap_or_default();

        self.transport
            .get(&format!("/booking/resource/{}", resource_id), &query)
            .await
    }

    async fn bookings_for_user(&self, user_id: i64) -> BookingResult<Vec<Booking>> {
        self.transport
            .get(&format!("/booking/user/{}", user_id), &[])
            .await
    }

    async fn get_booking(&self, id: i64) -> BookingResult<Booking> {
        self.transport.get(&format!("/booking/{}", id), &[]).await
    }

    async fn create_booking(&self, request: CreateBookingRequest) -> BookingResult<Booking> {
        let booking: Booking = self.transport.post("/booking", &request).await?;
        info!(
            "Created booking {} on resource {} ({} - {})",
            booking.id, booking.resource_id, booking.start_time, booking.end_time
        );
        Ok(booking)
    }

    async fn delete_booking(&self, id: i64) -> BookingResult<()> {
        self.transport.delete(&format!("/booking/{}", id)).await?;
        info!("Deleted booking {}", id);
        Ok(())
    }

    async fn list_resources(&self) -> BookingResult<Vec<Resource>> {
        self.transport.get("/resource", &[]).await
    }

    async fn get_resource(&self, id: i64) -> BookingResult<Resource> {
        self.transport.get(&format!("/resource/{}", id), &[]).await
    }
}
