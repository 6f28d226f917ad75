use crate::config::{connect_database, migrate_database, BootstrapSettings};

/// Apply pending migrations without starting the server
pub async fn run_migrations(settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let db = connect_database(settings).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
