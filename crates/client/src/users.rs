use async_trait::async_trait;
use slotbook_core::{
    errors::BookingResult,
    models::user::{CreateUserRequest, LoginRequest, User},
};

use crate::{config::ClientConfig, http::HttpTransport, UserApi};

/// HTTP implementation of [`UserApi`].
#[derive(Debug, Clone)]
pub struct UserClient {
    transport: HttpTransport,
}

impl UserClient {
    pub fn new(config: &ClientConfig) -> BookingResult<Self> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
        })
    }
}

#[async_trait]
impl UserApi for UserClient {
    async fn login(&self, request: LoginRequest) -> BookingResult<User> {
        self.transport.post("/user/login", &request).await
    }

    async fn register(&self, request: CreateUserRequest) -> BookingResult<User> {
        self.transport.post("/user/register", &request).await
    }
}
