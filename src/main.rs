use anyhow::Result;
use clap::Parser;
use hire3x_console::app_log;
use hire3x_console::cli::{handle_command, Cli};
use hire3x_console::core::ConfigManager;
use hire3x_console::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging first
    logging::init(&cli.log_file, cli.verbose)?;

    let config = ConfigManager::load()?;
    app_log!(info, "Environment: {}", config.environment);
    app_log!(info, "Matching backend: {}", config.api_url);

    handle_command(cli, config).await
}
