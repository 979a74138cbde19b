//! Hub server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p hub-server
//! ```
//!
//! Configuration is loaded from environment variables.

use hub_common::{try_init_tracing_with_config, HubConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration first; the environment decides the log format.
    let config = match HubConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let tracing_config = if config.app.env.is_production() {
        TracingConfig::production()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = try_init_tracing_with_config(&tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        addr = %config.server.address(),
        "Starting hub server"
    );

    if let Err(e) = hub_server::run(config).await {
        error!(error = %e, "Hub failed to start");
        std::process::exit(1);
    }
}
