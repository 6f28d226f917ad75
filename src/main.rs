use clap::Parser;

use schoolyard_backend::cli::{execute_command, Cli};
use schoolyard_backend::config::{init_logging, BootstrapSettings, SystemEnvironment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    init_logging(&SystemEnvironment)?;

    let cli = Cli::parse();

    let settings = BootstrapSettings::from_env().inspect_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
    })?;
    tracing::debug!("Loaded settings: {:?}", settings);

    execute_command(cli, &settings).await
}
