//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use tempus_auth::jwt::decoder::TokenDecoder;
use tempus_auth::ledger::TokenLedger;
use tempus_auth::session::manager::SessionManager;
use tempus_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Token decoder and validator.
    pub decoder: Arc<TokenDecoder>,
    /// Token ledger, the revocation source of truth.
    pub ledger: Arc<dyn TokenLedger>,
    /// Session lifecycle manager.
    pub sessions: Arc<SessionManager>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("decoder", &self.decoder)
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}
