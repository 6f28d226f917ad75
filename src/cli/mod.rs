// CLI module - server startup and maintenance commands

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::BootstrapSettings;

/// Schoolyard backend
#[derive(Parser)]
#[command(name = "schoolyard")]
#[command(about = "School administration REST backend", long_about = None)]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run migrations and start the HTTP server
    Serve,

    /// Run pending database migrations and exit
    Migrate,
}

pub async fn execute_command(cli: Cli, settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_server(settings).await?,
        Commands::Migrate => migrate::run_migrations(settings).await?,
    }

    Ok(())
}
