//! Review API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p review-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use review_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // No subscriber yet; fall back to the default one so the failure is logged
            let _ = try_init_tracing();
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    let log_format = std::env::var("LOG_FORMAT").ok();
    let tracing_config = TracingConfig::for_environment(config.app.env, log_format.as_deref());
    if let Err(e) = try_init_tracing_with_config(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.api.port,
        storage = ?config.storage,
        "Starting Review API Server..."
    );

    if let Err(e) = review_api::run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}
