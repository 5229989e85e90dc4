//! Company repository implementation.

use sqlx::PgPool;

use tempus_core::error::{AppError, ErrorKind};
use tempus_core::result::AppResult;
use tempus_entity::company::Company;

/// Repository for company lookup and credential updates.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    /// Create a new company repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a company by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Company>> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find company by id", e)
            })
    }

    /// Find a company by contact email (case-insensitive).
    pub async fn find_by_contact_email(&self, email: &str) -> AppResult<Option<Company>> {
        sqlx::query_as::<_, Company>(
            "SELECT * FROM companies WHERE LOWER(contact_email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find company by email", e)
        })
    }

    /// Replace a company's password hash.
    pub async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE companies SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update company password", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Company {id} not found")));
        }
        Ok(())
    }
}
