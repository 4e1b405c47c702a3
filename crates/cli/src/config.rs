use eyre::{eyre, Result};
use slotbook_client::ClientConfig;
use std::env;
use std::path::PathBuf;
use tracing::Level;

/// Session file location relative to the home directory
const SESSION_FILE: &str = ".slotbook/current_user.json";

/// Configuration for the command line front end.
///
/// Combines the API client settings with where the session is kept and how
/// verbose logging should be.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// How to reach the booking API
    pub api: ClientConfig,
    /// File holding the logged-in user
    pub session_file: PathBuf,
    /// Maximum level written to stderr (defaults to WARN)
    pub log_level: Level,
}

impl CliConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api = ClientConfig::from_env()?;

        let session_file = session_file(
            env::var("SLOTBOOK_SESSION_FILE").ok(),
            env::var_os("HOME").map(PathBuf::from),
        );

        let log_level = match env::var("LOG_LEVEL") {
            Ok(value) => parse_log_level(&value)?,
            Err(_) => Level::WARN,
        };

        Ok(Self {
            api,
            session_file,
            log_level,
        })
    }
}

/// Picks the session file: an explicit path wins, then `$HOME/.slotbook`,
/// then the working directory.
pub fn session_file(explicit: Option<String>, home: Option<PathBuf>) -> PathBuf {
    match (explicit.filter(|path| !path.trim().is_empty()), home) {
        (Some(path), _) => PathBuf::from(path),
        (None, Some(home)) => home.join(SESSION_FILE),
        (None, None) => PathBuf::from(SESSION_FILE),
    }
}

pub fn parse_log_level(value: &str) -> Result<Level> {
    value
        .trim()
        .parse::<Level>()
        .map_err(|_| eyre!("LOG_LEVEL must be one of trace, debug, info, warn, error (got '{}')", value))
}
