use clap::Parser;
use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotbook_cli::{Cli, CliConfig};
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let cli = Cli::parse();
    let config = CliConfig::from_env()?;

    // Logs go to stderr so command output stays clean
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Session file: {}", config.session_file.display());

    slotbook_cli::run(cli, &config).await
}
