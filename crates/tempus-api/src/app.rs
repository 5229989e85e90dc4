//! Application builder — wires components, router, and middleware into
//! a running Axum server.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use tempus_auth::directory::{PostgresPrincipalDirectory, PrincipalDirectory};
use tempus_auth::jwt::decoder::TokenDecoder;
use tempus_auth::jwt::encoder::TokenEncoder;
use tempus_auth::ledger::{PostgresTokenLedger, TokenLedger};
use tempus_auth::session::manager::SessionManager;
use tempus_core::config::AppConfig;
use tempus_core::error::AppError;
use tempus_database::repositories::company::CompanyRepository;
use tempus_database::repositories::token::TokenRepository;
use tempus_database::repositories::user::UserRepository;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application from pre-wired state.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Wires every component and runs the Tempus server until shutdown.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting Tempus server...");

    // Repositories
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let company_repo = Arc::new(CompanyRepository::new(db_pool.clone()));
    let token_repo = Arc::new(TokenRepository::new(db_pool.clone()));

    // Auth components
    let keys = config.auth.load_keys()?;
    let encoder = Arc::new(TokenEncoder::new(&config.auth, &keys)?);
    let decoder = Arc::new(TokenDecoder::new(&keys)?);
    let ledger: Arc<dyn TokenLedger> = Arc::new(PostgresTokenLedger::new(token_repo));
    let directory: Arc<dyn PrincipalDirectory> =
        Arc::new(PostgresPrincipalDirectory::new(user_repo, company_repo));

    let sessions = Arc::new(SessionManager::new(
        &config.auth,
        encoder,
        Arc::clone(&decoder),
        Arc::clone(&ledger),
        directory,
    ));

    let state = AppState {
        config: Arc::new(config.clone()),
        db_pool,
        decoder,
        ledger,
        sessions,
    };

    let app = build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Tempus server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
    }
}
