//! Route definitions for the Tempus HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(authenticate_routes())
        .merge(health_routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Authentication endpoints: login, logout, change-password, refresh.
fn authenticate_routes() -> Router<AppState> {
    Router::new()
        .route("/authenticate/login", post(handlers::auth::login))
        .route("/authenticate/logout", delete(handlers::auth::logout))
        .route(
            "/authenticate/change-password",
            post(handlers::auth::change_password),
        )
        .route(
            "/authenticate/refresh-token",
            post(handlers::auth::refresh),
        )
}

/// Unauthenticated health probe.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
