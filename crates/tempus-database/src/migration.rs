//! Embedded schema migrations.

use sqlx::PgPool;
use tracing::info;

use tempus_core::error::{AppError, ErrorKind};
use tempus_core::result::AppResult;

/// Apply any migrations the database has not seen yet.
///
/// Migrations are compiled into the binary from `migrations/`, so a
/// deployed server needs no SQL files on disk.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Migration run failed", e))?;

    info!("Schema migrations applied");
    Ok(())
}
