//! JWT claims structure used in access and refresh tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tempus_core::AppResult;
use tempus_entity::principal::SubjectRef;
use tempus_entity::token::TokenKind;
use tempus_entity::user::Role;

/// JWT claims payload embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the principal identity (`user:42` or `company:7`).
    pub sub: String,
    /// Tenant scope. A user's company, or the company's own id.
    pub company_id: i64,
    /// Role at issuance time. Absent for company principals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token id, the ledger's revocation key.
    pub jti: Uuid,
    /// Token kind: access or refresh.
    pub kind: TokenKind,
    /// Caller-supplied additional claims, carried verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Claims {
    /// Parse the subject identity.
    pub fn subject(&self) -> AppResult<SubjectRef> {
        self.sub.parse()
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Returns the remaining TTL in seconds (0 if expired).
    pub fn remaining_ttl_seconds(&self) -> u64 {
        let remaining = self.exp - Utc::now().timestamp();
        if remaining > 0 { remaining as u64 } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_claims_flatten() {
        let mut extra = serde_json::Map::new();
        extra.insert("first_name".into(), serde_json::json!("Ada"));

        let claims = Claims {
            sub: "user:1".into(),
            company_id: 9,
            role: Some(Role::Employee),
            iat: 1_700_000_000,
            exp: 1_700_000_900,
            jti: Uuid::new_v4(),
            kind: TokenKind::Access,
            extra,
        };

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["first_name"], "Ada");
        assert_eq!(value["kind"], "access");

        let back: Claims = serde_json::from_value(value).unwrap();
        assert_eq!(back.extra["first_name"], "Ada");
        assert_eq!(back.role, Some(Role::Employee));
    }

    #[test]
    fn test_expiry_helpers() {
        let mut claims = Claims {
            sub: "user:1".into(),
            company_id: 1,
            role: None,
            iat: 0,
            exp: Utc::now().timestamp() - 60,
            jti: Uuid::new_v4(),
            kind: TokenKind::Refresh,
            extra: serde_json::Map::new(),
        };
        assert!(claims.is_expired());
        assert_eq!(claims.remaining_ttl_seconds(), 0);

        claims.exp = Utc::now().timestamp() + 600;
        assert!(!claims.is_expired());
        assert!(claims.remaining_ttl_seconds() > 0);
    }
}
