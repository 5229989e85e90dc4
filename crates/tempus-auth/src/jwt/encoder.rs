//! Token creation with RS256 signing and per-kind TTLs.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use tempus_core::config::auth::{AuthConfig, KeyMaterial};
use tempus_core::error::AppError;
use tempus_entity::principal::Principal;
use tempus_entity::token::TokenKind;

use super::claims::Claims;

/// Creates signed access and refresh tokens.
#[derive(Clone)]
pub struct TokenEncoder {
    /// RSA private key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for TokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

/// Result of a successful token issuance.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedToken {
    /// The serialized signed token.
    pub token: String,
    /// The freshly generated token id.
    pub jti: Uuid,
    /// Access or refresh.
    pub kind: TokenKind,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

impl TokenEncoder {
    /// Creates a new encoder from auth configuration and key material.
    pub fn new(config: &AuthConfig, keys: &KeyMaterial) -> Result<Self, AppError> {
        let encoding_key = EncodingKey::from_rsa_pem(keys.private_pem.as_bytes())
            .map_err(|e| AppError::configuration(format!("Invalid RSA private key: {e}")))?;

        Ok(Self {
            encoding_key,
            access_ttl_minutes: config.access_ttl_minutes as i64,
            refresh_ttl_days: config.refresh_ttl_days as i64,
        })
    }

    /// Issues a signed token of the given kind for a principal.
    ///
    /// The claims carry the principal's subject, tenant, and role; any
    /// `extra` claims are merged in verbatim. The TTL is fixed per kind.
    pub fn issue(
        &self,
        kind: TokenKind,
        principal: &Principal,
        extra: serde_json::Map<String, serde_json::Value>,
    ) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = now + self.ttl(kind);
        let jti = Uuid::new_v4();

        let claims = Claims {
            sub: principal.subject_id(),
            company_id: principal.tenant_id(),
            role: principal.role(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti,
            kind,
            extra,
        };

        let token = encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode {kind} token: {e}")))?;

        Ok(IssuedToken {
            token,
            jti,
            kind,
            expires_at,
        })
    }

    /// Issues both tokens of a login pair.
    pub fn issue_pair(
        &self,
        principal: &Principal,
        extra: serde_json::Map<String, serde_json::Value>,
    ) -> Result<(IssuedToken, IssuedToken), AppError> {
        let access = self.issue(TokenKind::Access, principal, extra.clone())?;
        let refresh = self.issue(TokenKind::Refresh, principal, extra)?;
        Ok((access, refresh))
    }

    fn ttl(&self, kind: TokenKind) -> chrono::Duration {
        match kind {
            TokenKind::Access => chrono::Duration::minutes(self.access_ttl_minutes),
            TokenKind::Refresh => chrono::Duration::days(self.refresh_ttl_days),
        }
    }
}
