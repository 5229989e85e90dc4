//! Token ledger row model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "token_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived token for API requests.
    Access,
    /// Long-lived token for obtaining new access tokens.
    Refresh,
}

impl TokenKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row in the token ledger.
///
/// A row is created for every issued token and is never deleted; the only
/// mutation the ledger allows is flipping `revoked` to true. Together with
/// the unique index on `jti`, this makes the table a complete audit trail
/// of every credential the system has ever handed out.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TokenRecord {
    /// Ledger row id.
    pub id: i64,
    /// Unique token identifier, the revocation key.
    pub jti: Uuid,
    /// Access or refresh.
    pub kind: TokenKind,
    /// Owning principal identity.
    pub subject: String,
    /// Whether the token has been revoked. One-way.
    pub revoked: bool,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
    /// Expiry as epoch seconds, kept redundantly for audit parity.
    pub epoch_expires: i64,
    /// When the row was created (issuance time).
    pub created_at: DateTime<Utc>,
    /// When the row was last updated (revocation time, if any).
    pub updated_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Whether the token is past its expiry.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Whether the token is still usable: not revoked and not expired.
    pub fn is_active(&self) -> bool {
        !self.revoked && !self.is_expired()
    }
}

/// Data required to record a newly issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewToken {
    /// Unique token identifier from the codec.
    pub jti: Uuid,
    /// Access or refresh.
    pub kind: TokenKind,
    /// Owning principal identity.
    pub subject: String,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}
