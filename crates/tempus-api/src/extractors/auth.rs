//! `AuthPrincipal` extractor — pulls the bearer token from the
//! Authorization header, validates it, and checks the ledger.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use tempus_auth::jwt::claims::Claims;
use tempus_core::error::AppError;
use tempus_entity::token::TokenKind;

use crate::error::ApiError;
use crate::state::AppState;

/// Validated claims of the calling principal, available in handlers.
///
/// Extraction performs the full access-guard sequence: header shape,
/// signature and expiry via the decoder, access kind, then a ledger
/// lookup. A token the ledger does not know is treated as revoked.
#[derive(Debug, Clone)]
pub struct AuthPrincipal(pub Claims);

impl AuthPrincipal {
    /// Returns the validated claims.
    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

impl std::ops::Deref for AuthPrincipal {
    type Target = Claims;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::malformed("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::malformed("Invalid Authorization header format"))?;

        let claims = state.decoder.decode_kind(token, TokenKind::Access)?;

        if state.ledger.is_revoked(claims.jti).await? {
            return Err(AppError::revoked("Token has been revoked").into());
        }

        Ok(AuthPrincipal(claims))
    }
}
