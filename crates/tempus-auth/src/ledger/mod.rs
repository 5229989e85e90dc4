//! Token ledger — the persisted source of truth for revocation.
//!
//! Every issued token gets a ledger row at issuance time; the row is
//! never deleted and its only mutation is the one-way `revoked` flip.
//! Lookups fail closed: a token id the ledger has never seen reads as
//! revoked.
//!
//! Two implementations:
//! - [`PostgresTokenLedger`] backed by the `token_blacklist` table
//! - [`MemoryTokenLedger`] for tests and single-node development

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use tempus_core::AppResult;
use tempus_entity::token::NewToken;

pub use memory::MemoryTokenLedger;
pub use postgres::PostgresTokenLedger;

/// Persisted lifecycle tracking for issued tokens.
#[async_trait]
pub trait TokenLedger: Send + Sync {
    /// Record a newly issued token as non-revoked. Fails with
    /// `DuplicateId` if the jti already exists.
    async fn record(&self, token: NewToken) -> AppResult<()>;

    /// Record both tokens of a login pair atomically: if the second
    /// insert fails, the first must not survive.
    async fn record_pair(&self, access: NewToken, refresh: NewToken) -> AppResult<()>;

    /// Flip a token to revoked. Idempotent; silently succeeds when the
    /// jti is absent, since the codec guarantees id uniqueness at
    /// issuance.
    async fn revoke(&self, jti: Uuid) -> AppResult<()>;

    /// Whether a token is revoked. Unknown jtis read as revoked.
    async fn is_revoked(&self, jti: Uuid) -> AppResult<bool>;

    /// Revoke every non-revoked token owned by a subject; returns the
    /// number of tokens flipped.
    async fn revoke_all_for(&self, subject: &str) -> AppResult<u64>;
}
