use eyre::Result;
use slotbook_app::{
    dialog::{Confirm, FixedAnswer},
    FileStorage, SessionStore,
};
use slotbook_client::{BookingClient, UserClient};
use tracing::info;

pub mod commands;
pub mod config;
pub mod handlers;
pub mod render;

pub use commands::{Cli, Command};
pub use config::CliConfig;

/// Run one command against the configured API.
///
/// Output goes to stdout; logs go wherever the subscriber writes.
///
/// # Arguments
///
/// * `cli` - The parsed command line
/// * `config` - API location, session file and log level
pub async fn run(cli: Cli, config: &CliConfig) -> Result<()> {
    info!("Using API at {}", config.api.base_url);

    let bookings = BookingClient::new(&config.api)?;
    let users = UserClient::new(&config.api)?;
    let session = SessionStore::open(FileStorage::new(&config.session_file));

    let mut confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(FixedAnswer(true))
    } else {
        Box::new(handlers::LineConfirm::stdio())
    };

    let mut out = std::io::stdout();
    handlers::Handler::new(bookings, users, session)
        .handle(cli.command, confirm.as_mut(), &mut out)
        .await
}
