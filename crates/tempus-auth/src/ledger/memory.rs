//! In-memory token ledger using a Tokio mutex for single-node use.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use tempus_core::{AppError, AppResult};
use tempus_entity::token::{NewToken, TokenKind};

use super::TokenLedger;

/// One in-memory ledger entry.
#[derive(Debug, Clone)]
struct Entry {
    kind: TokenKind,
    subject: String,
    revoked: bool,
    expires_at: DateTime<Utc>,
}

/// In-memory token ledger using a Tokio mutex for thread safety.
///
/// Suitable for tests and single-node development only; nothing
/// survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenLedger {
    entries: Arc<Mutex<HashMap<Uuid, Entry>>>,
}

impl MemoryTokenLedger {
    /// Creates an empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries for a subject (not revoked, not past
    /// expiry). Test helper.
    pub async fn active_count_for(&self, subject: &str) -> usize {
        let now = Utc::now();
        let entries = self.entries.lock().await;
        entries
            .values()
            .filter(|e| e.subject == subject && !e.revoked && e.expires_at > now)
            .count()
    }

    /// Recorded kind for a jti, if present. Test helper.
    pub async fn kind_of(&self, jti: Uuid) -> Option<TokenKind> {
        let entries = self.entries.lock().await;
        entries.get(&jti).map(|e| e.kind)
    }
}

#[async_trait]
impl TokenLedger for MemoryTokenLedger {
    async fn record(&self, token: NewToken) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        if entries.contains_key(&token.jti) {
            return Err(AppError::duplicate_id(format!(
                "Token id {} already recorded",
                token.jti
            )));
        }
        entries.insert(
            token.jti,
            Entry {
                kind: token.kind,
                subject: token.subject,
                revoked: false,
                expires_at: token.expires_at,
            },
        );
        Ok(())
    }

    async fn record_pair(&self, access: NewToken, refresh: NewToken) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        // Check both before inserting either, so a duplicate in the
        // second token leaves no trace of the first.
        for token in [&access, &refresh] {
            if entries.contains_key(&token.jti) {
                return Err(AppError::duplicate_id(format!(
                    "Token id {} already recorded",
                    token.jti
                )));
            }
        }
        for token in [access, refresh] {
            entries.insert(
                token.jti,
                Entry {
                    kind: token.kind,
                    subject: token.subject,
                    revoked: false,
                    expires_at: token.expires_at,
                },
            );
        }
        Ok(())
    }

    async fn revoke(&self, jti: Uuid) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get_mut(&jti) {
            entry.revoked = true;
        }
        Ok(())
    }

    async fn is_revoked(&self, jti: Uuid) -> AppResult<bool> {
        let entries = self.entries.lock().await;
        Ok(entries.get(&jti).map(|e| e.revoked).unwrap_or(true))
    }

    async fn revoke_all_for(&self, subject: &str) -> AppResult<u64> {
        let mut entries = self.entries.lock().await;
        let mut flipped = 0u64;
        for entry in entries.values_mut() {
            if entry.subject == subject && !entry.revoked {
                entry.revoked = true;
                flipped += 1;
            }
        }
        if flipped > 0 {
            info!(subject = %subject, count = flipped, "Revoked all tokens for subject");
        }
        Ok(flipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_token(subject: &str, kind: TokenKind) -> NewToken {
        NewToken {
            jti: Uuid::new_v4(),
            kind,
            subject: subject.to_string(),
            expires_at: Utc::now() + chrono::Duration::minutes(15),
        }
    }

    #[tokio::test]
    async fn test_unknown_jti_reads_as_revoked() {
        let ledger = MemoryTokenLedger::new();
        assert!(ledger.is_revoked(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_revoke_is_permanent_and_idempotent() {
        let ledger = MemoryTokenLedger::new();
        let token = new_token("user:1", TokenKind::Access);
        let jti = token.jti;

        ledger.record(token).await.unwrap();
        assert!(!ledger.is_revoked(jti).await.unwrap());

        ledger.revoke(jti).await.unwrap();
        assert!(ledger.is_revoked(jti).await.unwrap());

        // Second revoke is a no-op, not an error.
        ledger.revoke(jti).await.unwrap();
        assert!(ledger.is_revoked(jti).await.unwrap());

        // Absent jti: silent success.
        ledger.revoke(Uuid::new_v4()).await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let ledger = MemoryTokenLedger::new();
        let token = new_token("user:1", TokenKind::Access);
        let dup = NewToken {
            jti: token.jti,
            ..new_token("user:2", TokenKind::Refresh)
        };

        ledger.record(token).await.unwrap();
        let err = ledger.record(dup).await.unwrap_err();
        assert_eq!(err.kind, tempus_core::ErrorKind::DuplicateId);
    }

    #[tokio::test]
    async fn test_pair_rollback_on_duplicate() {
        let ledger = MemoryTokenLedger::new();
        let existing = new_token("user:1", TokenKind::Refresh);
        let existing_jti = existing.jti;
        ledger.record(existing).await.unwrap();

        let access = new_token("user:2", TokenKind::Access);
        let access_jti = access.jti;
        let colliding_refresh = NewToken {
            jti: existing_jti,
            ..new_token("user:2", TokenKind::Refresh)
        };

        let err = ledger.record_pair(access, colliding_refresh).await.unwrap_err();
        assert_eq!(err.kind, tempus_core::ErrorKind::DuplicateId);
        // The access token must not have been recorded.
        assert!(ledger.is_revoked(access_jti).await.unwrap());
    }

    #[tokio::test]
    async fn test_revoke_all_for_counts_exactly() {
        let ledger = MemoryTokenLedger::new();
        for _ in 0..3 {
            ledger.record(new_token("user:7", TokenKind::Access)).await.unwrap();
        }
        ledger.record(new_token("user:8", TokenKind::Access)).await.unwrap();

        // One of user:7's tokens is already revoked and must not count.
        let extra = new_token("user:7", TokenKind::Refresh);
        let extra_jti = extra.jti;
        ledger.record(extra).await.unwrap();
        ledger.revoke(extra_jti).await.unwrap();

        assert_eq!(ledger.revoke_all_for("user:7").await.unwrap(), 3);
        assert_eq!(ledger.revoke_all_for("user:7").await.unwrap(), 0);
        assert_eq!(ledger.active_count_for("user:8").await, 1);
    }
}
