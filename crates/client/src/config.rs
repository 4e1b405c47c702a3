//! # Client Configuration
//!
//! Settings for reaching the booking API, loaded from environment variables:
//!
//! - `SLOTBOOK_API_URL`: Base URL of the API (default: "http://localhost:5211/api")
//! - `SLOTBOOK_REQUEST_TIMEOUT_SECONDS`: Optional per-request timeout; unset means no timeout

use eyre::{Result, WrapErr};
use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:5211/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,

    /// Request timeout in seconds, `None` to wait indefinitely
    pub request_timeout: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: None,
        }
    }

    /// Creates a new ClientConfig from environment variables
    ///
    /// # Errors
    ///
    /// Fails if `SLOTBOOK_REQUEST_TIMEOUT_SECONDS` is set but is not a whole number.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("SLOTBOOK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let request_timeout = match env::var("SLOTBOOK_REQUEST_TIMEOUT_SECONDS") {
            Ok(value) => Some(
                value
                    .trim()
                    .parse()
                    .wrap_err("Invalid SLOTBOOK_REQUEST_TIMEOUT_SECONDS value")?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            base_url,
            request_timeout,
        })
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout = Some(seconds);
        self
    }
}
