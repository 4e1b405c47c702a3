use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("API error ({status}): {}", message.as_deref().unwrap_or("no details"))]
    Api { status: u16, message: Option<String> },

    #[error("Transport error: {0}")]
    Transport(#[from] eyre::Report),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl BookingError {
    /// Message supplied by the server, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            BookingError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
