//! ChatStream API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p chatstream-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env` if present).

use chatstream_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first so the log preset can follow APP_ENV
    let config = AppConfig::from_env()?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        host = %config.api.host,
        port = config.api.port,
        "Configuration loaded"
    );

    chatstream_api::run(config).await?;

    Ok(())
}
