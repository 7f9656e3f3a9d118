//! MACD alert runner
//!
//! Runs the subscription loop for the configured pair in the foreground until
//! Ctrl-C.

use dotenvy::dotenv;
use macd_alert::config::{get_environment, Config};
use macd_alert::core::bootstrap::build_runtime;
use macd_alert::logging;
use macd_alert::metrics::Metrics;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging(&get_environment());

    let config = Config::from_env()?;
    info!(environment = %config.environment, "Starting MACD alert runner");
    info!(
        symbol = %config.runtime.symbol,
        timeframe = %config.runtime.timeframe,
        window = config.runtime.window_size,
        fast = config.runtime.macd.fast,
        slow = config.runtime.macd.slow,
        signal = config.runtime.macd.signal,
        "Stream configuration"
    );

    let metrics = Arc::new(Metrics::new()?);
    let runtime = build_runtime(&config, metrics);
    let runtime_handle = tokio::spawn(runtime.run());

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down...");
        }
        result = runtime_handle => {
            if let Err(e) = result {
                error!(error = %e, "Signal runtime stopped");
            }
        }
    }

    Ok(())
}
