use std::time::Duration;

use tokio::time::Instant;

/// How long a success notice stays visible
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// A transient message that disappears on its own.
#[derive(Debug, Clone)]
pub struct Notice {
    text: String,
    expires_at: Instant,
}

impl Notice {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expires_at: Instant::now() + NOTICE_TTL,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        Instant::now() < self.expires_at
    }
}
