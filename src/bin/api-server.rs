//! MACD alert API server
//!
//! `GET /` starts the kline subscription loop for the configured pair;
//! `/health` and `/metrics` report on it.

use dotenvy::dotenv;
use macd_alert::config::{get_environment, Config};
use macd_alert::core::http::start_server;
use macd_alert::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging(&get_environment());

    let config = Config::from_env()?;
    let port = config.port;

    info!("Starting MACD alert API server");
    info!(environment = %config.environment, "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
