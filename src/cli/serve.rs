use std::sync::Arc;

use poem::listener::TcpListener;
use poem::Server;

use crate::api::build_routes;
use crate::app_data::AppData;
use crate::config::{connect_database, migrate_database, BootstrapSettings};

/// Connect, migrate and serve until the process is stopped
pub async fn run_server(settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    let db = connect_database(settings).await?;
    migrate_database(&db).await?;

    let app_data = Arc::new(AppData::init(db, settings));

    let address = settings.server_address();
    let server_url = format!("http://{}:{}/api", public_host(settings.server_host()), settings.server_port());
    let app = build_routes(app_data, &server_url);

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger", address);

    Server::new(TcpListener::bind(address)).run(app).await?;

    Ok(())
}

/// Wildcard bind addresses are not reachable from a browser
fn public_host(host: &str) -> &str {
    match host {
        "0.0.0.0" | "::" => "localhost",
        other => other,
    }
}
