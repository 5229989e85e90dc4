//! Tempus Server — authentication and session backend for the Tempus
//! timesheet platform.
//!
//! Entry point that loads configuration, connects to the database, and
//! starts the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use tempus_core::config::AppConfig;
use tempus_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("TEMPUS_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!("Loaded configuration (env: {})", env);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Tempus v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let pool = tempus_database::connection::DatabasePool::connect(&config.database).await?;

    tempus_database::migration::run_migrations(pool.pool()).await?;

    tempus_api::run_server(config, pool.into_pool()).await
}
