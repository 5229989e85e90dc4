//! PostgreSQL-backed token ledger.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use tempus_core::AppResult;
use tempus_database::repositories::token::TokenRepository;
use tempus_entity::token::NewToken;

use super::TokenLedger;

/// Token ledger backed by the `token_blacklist` table.
///
/// All operations delegate to single-statement repository calls; the
/// pair insert runs in one transaction inside the repository.
#[derive(Debug, Clone)]
pub struct PostgresTokenLedger {
    repo: Arc<TokenRepository>,
}

impl PostgresTokenLedger {
    /// Creates a ledger over the given repository.
    pub fn new(repo: Arc<TokenRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl TokenLedger for PostgresTokenLedger {
    async fn record(&self, token: NewToken) -> AppResult<()> {
        self.repo.insert(&token).await?;
        Ok(())
    }

    async fn record_pair(&self, access: NewToken, refresh: NewToken) -> AppResult<()> {
        self.repo.insert_pair(&access, &refresh).await
    }

    async fn revoke(&self, jti: Uuid) -> AppResult<()> {
        self.repo.revoke(jti).await
    }

    async fn is_revoked(&self, jti: Uuid) -> AppResult<bool> {
        self.repo.is_revoked(jti).await
    }

    async fn revoke_all_for(&self, subject: &str) -> AppResult<u64> {
        self.repo.revoke_all_for_subject(subject).await
    }
}
