//! Server startup with automatic configuration loading

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::Result;
use tracing::info;

/// Run the server, loading configuration from `config_path`
///
/// A missing or unreadable configuration file is not fatal; the server
/// falls back to built-in defaults overlaid with `WORKLEDGER_*`
/// environment variables.
pub async fn run_server(config_path: &str) -> Result<()> {
    info!("🚀 Starting Workledger");

    info!("📄 Loading configuration file: {}", config_path);

    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            info!("✅ Configuration file loaded successfully");
            config
        }
        Err(e) => {
            info!(
                "⚠️  Configuration file loading failed, using environment defaults: {}",
                e
            );
            Config::from_env()?
        }
    };

    let server = HttpServer::new(&config).await?;
    info!(
        "🌐 Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("📋 API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /api/auth/register - Register a user");
    info!("   POST /api/auth/login - Log in");
    info!("   GET  /api/projects - Project list");
    info!("   GET  /api/billing/accounts - Billing account");
    info!("   GET  /api/dashboard - Dashboard summary");

    server.start().await
}
