//! Token ledger repository.
//!
//! Every mutation here is a single atomic statement; the pair-insert used
//! at login is the one multi-row operation and runs inside a transaction
//! so a failed refresh-token insert rolls back the access-token row too.

use sqlx::PgPool;
use uuid::Uuid;

use tempus_core::error::{AppError, ErrorKind};
use tempus_core::result::AppResult;
use tempus_entity::token::{NewToken, TokenRecord};

/// Repository for token ledger rows.
#[derive(Debug, Clone)]
pub struct TokenRepository {
    pool: PgPool,
}

impl TokenRepository {
    /// Create a new token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a ledger row by token id.
    pub async fn find_by_jti(&self, jti: Uuid) -> AppResult<Option<TokenRecord>> {
        sqlx::query_as::<_, TokenRecord>("SELECT * FROM token_blacklist WHERE jti = $1")
            .bind(jti)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find token", e))
    }

    /// Insert a new non-revoked ledger row.
    ///
    /// The unique index on `jti` backs the duplicate check; a collision is
    /// reported as `DuplicateId` rather than a generic database error.
    pub async fn insert(&self, token: &NewToken) -> AppResult<TokenRecord> {
        sqlx::query_as::<_, TokenRecord>(
            "INSERT INTO token_blacklist (jti, kind, subject, expires_at, epoch_expires) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(token.jti)
        .bind(token.kind)
        .bind(&token.subject)
        .bind(token.expires_at)
        .bind(token.expires_at.timestamp())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(token.jti, e))
    }

    /// Insert two ledger rows in one transaction.
    ///
    /// Used at login for the access/refresh pair: if the second insert
    /// fails, the first is rolled back.
    pub async fn insert_pair(&self, first: &NewToken, second: &NewToken) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        for token in [first, second] {
            sqlx::query(
                "INSERT INTO token_blacklist (jti, kind, subject, expires_at, epoch_expires) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(token.jti)
            .bind(token.kind)
            .bind(&token.subject)
            .bind(token.expires_at)
            .bind(token.expires_at.timestamp())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_insert_error(token.jti, e))?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit token pair", e)
        })
    }

    /// Flip a token to revoked. Idempotent; a missing or already-revoked
    /// jti is not an error.
    pub async fn revoke(&self, jti: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE token_blacklist SET revoked = TRUE, updated_at = NOW() \
             WHERE jti = $1 AND NOT revoked",
        )
        .bind(jti)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revoke token", e))?;
        Ok(())
    }

    /// Revocation check. Fails closed: an unknown jti reads as revoked.
    pub async fn is_revoked(&self, jti: Uuid) -> AppResult<bool> {
        let revoked: Option<bool> =
            sqlx::query_scalar("SELECT revoked FROM token_blacklist WHERE jti = $1")
                .bind(jti)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to check revocation", e)
                })?;
        Ok(revoked.unwrap_or(true))
    }

    /// Revoke every non-revoked token owned by a subject in one sweep.
    /// Returns the number of rows flipped.
    pub async fn revoke_all_for_subject(&self, subject: &str) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE token_blacklist SET revoked = TRUE, updated_at = NOW() \
             WHERE subject = $1 AND NOT revoked",
        )
        .bind(subject)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke subject tokens", e)
        })?;

        Ok(result.rows_affected())
    }

    /// List all ledger rows for a subject, newest first (audit view).
    pub async fn find_by_subject(&self, subject: &str) -> AppResult<Vec<TokenRecord>> {
        sqlx::query_as::<_, TokenRecord>(
            "SELECT * FROM token_blacklist WHERE subject = $1 ORDER BY created_at DESC",
        )
        .bind(subject)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list subject tokens", e)
        })
    }
}

/// Classify an insert failure: unique-index collisions on `jti` become
/// `DuplicateId`, everything else stays a database error.
fn map_insert_error(jti: Uuid, e: sqlx::Error) -> AppError {
    let is_duplicate = e
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);

    if is_duplicate {
        AppError::duplicate_id(format!("Token id {jti} already recorded"))
    } else {
        AppError::with_source(ErrorKind::Database, "Failed to record token", e)
    }
}
