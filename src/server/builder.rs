//! Server bootstrap: configuration loading, migrations, listen loop

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::storage::Database;
use crate::utils::error::Result;
use tracing::info;

/// Load configuration, connect and migrate the database, then serve.
///
/// With `migrate_only`, stops after the migrations have been applied.
pub async fn run_server(config_path: &str, migrate_only: bool) -> Result<()> {
    info!("Starting planacad-rs");

    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            info!("Configuration file loaded: {}", config_path);
            config
        }
        Err(e) => {
            info!(
                "Configuration file not loaded ({}), falling back to defaults + environment",
                e
            );
            Config::from_env()?
        }
    };

    let database = Database::new(&config.database).await?;
    database.migrate().await?;
    if migrate_only {
        info!("Migrations applied, exiting (--migrate)");
        return Ok(());
    }

    let server = HttpServer::new(&config, database);
    info!(
        "Server starting at: http://{}:{}",
        config.server.host, config.server.port
    );
    info!("API endpoints:");
    info!("   GET  /health - liveness probe");
    info!("   POST /uploads/{{tipo}} - spreadsheet upload (multipart)");
    info!("   GET  /uploads/recent - latest batches");
    info!("   GET  /uploads/history - paginated history");
    info!("   GET  /uploads/{{id}} - batch detail");
    info!("   POST /uploads/{{id}}/approve | /uploads/{{id}}/reject");
    info!("   GET  /uploads/admin/stats | /uploads/admin/health");

    server.start().await
}
