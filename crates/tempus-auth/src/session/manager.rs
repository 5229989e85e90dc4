//! Orchestration of the authentication flows.
//!
//! The manager owns no state of its own; it wires the hasher, the token
//! codec, the ledger, and the directory into the four session flows and
//! enforces their ordering: credentials are checked before any token is
//! minted, and a token is recorded in the ledger before it is handed to
//! the caller.

use std::sync::Arc;

use tracing::{info, warn};

use tempus_core::config::auth::AuthConfig;
use tempus_core::{AppError, AppResult};
use tempus_entity::principal::{Principal, SubjectRef};
use tempus_entity::token::{NewToken, TokenKind};

use crate::directory::PrincipalDirectory;
use crate::jwt::{Claims, IssuedToken, TokenDecoder, TokenEncoder};
use crate::ledger::TokenLedger;
use crate::password::PasswordHasher;

/// A successful login: the authenticated principal and its token pair.
#[derive(Debug, Clone)]
pub struct Session {
    /// The principal the credentials resolved to.
    pub principal: Principal,
    /// Short-lived access token.
    pub access: IssuedToken,
    /// Long-lived refresh token.
    pub refresh: IssuedToken,
}

/// Coordinates the authentication flows.
#[derive(Clone)]
pub struct SessionManager {
    hasher: PasswordHasher,
    encoder: Arc<TokenEncoder>,
    decoder: Arc<TokenDecoder>,
    ledger: Arc<dyn TokenLedger>,
    directory: Arc<dyn PrincipalDirectory>,
    password_min_length: usize,
}

impl SessionManager {
    /// Wires up a session manager from its collaborators.
    pub fn new(
        config: &AuthConfig,
        encoder: Arc<TokenEncoder>,
        decoder: Arc<TokenDecoder>,
        ledger: Arc<dyn TokenLedger>,
        directory: Arc<dyn PrincipalDirectory>,
    ) -> Self {
        Self {
            hasher: PasswordHasher::new(),
            encoder,
            decoder,
            ledger,
            directory,
            password_min_length: config.password_min_length,
        }
    }

    /// Authenticates an email/password pair and issues a token pair.
    ///
    /// An unknown email and a wrong password produce the same
    /// `InvalidCredentials` error, so a caller cannot probe which emails
    /// exist. Both tokens are recorded in the ledger atomically before
    /// they are returned.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        let principal = match self.directory.find_by_email(email).await? {
            Some(p) => p,
            None => {
                warn!(email = %email, "Login attempt for unknown email");
                return Err(AppError::invalid_credentials("Invalid email or password"));
            }
        };

        let stored_hash = principal
            .password_hash()
            .ok_or_else(|| AppError::invalid_credentials("Invalid email or password"))?;

        if !self.hasher.verify_password(password, stored_hash)? {
            warn!(subject = %principal.subject_id(), "Login attempt with wrong password");
            return Err(AppError::invalid_credentials("Invalid email or password"));
        }

        let (access, refresh) = self
            .encoder
            .issue_pair(&principal, serde_json::Map::new())?;

        self.ledger
            .record_pair(
                Self::ledger_entry(&principal, &access),
                Self::ledger_entry(&principal, &refresh),
            )
            .await?;

        info!(subject = %principal.subject_id(), "Login succeeded");

        Ok(Session {
            principal,
            access,
            refresh,
        })
    }

    /// Revokes the presented token. Idempotent: logging out twice with
    /// the same token succeeds both times.
    pub async fn logout(&self, claims: &Claims) -> AppResult<()> {
        self.ledger.revoke(claims.jti).await?;
        info!(subject = %claims.sub, jti = %claims.jti, "Token revoked on logout");
        Ok(())
    }

    /// Exchanges a valid, non-revoked refresh token for a fresh access
    /// token.
    ///
    /// The refresh token itself stays valid; only a new access token is
    /// minted and recorded. Presenting an access token here fails with
    /// `Malformed` before any ledger write.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<IssuedToken> {
        let claims = self.decoder.decode_kind(refresh_token, TokenKind::Refresh)?;

        if self.ledger.is_revoked(claims.jti).await? {
            return Err(AppError::revoked("Refresh token has been revoked"));
        }

        let subject = claims.subject()?;
        let principal = self
            .directory
            .find_by_subject(subject)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Subject {subject} not found")))?;

        let access = self
            .encoder
            .issue(TokenKind::Access, &principal, serde_json::Map::new())?;
        self.ledger
            .record(Self::ledger_entry(&principal, &access))
            .await?;

        info!(subject = %subject, "Access token refreshed");
        Ok(access)
    }

    /// Replaces a principal's password after verifying the current one.
    ///
    /// Existing sessions stay valid; callers wanting a clean slate
    /// follow up with [`Self::revoke_all_for`].
    pub async fn change_password(
        &self,
        subject: SubjectRef,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        if new_password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }
        if new_password == current_password {
            return Err(AppError::validation(
                "New password must differ from the current password",
            ));
        }

        let principal = self
            .directory
            .find_by_subject(subject)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Subject {subject} not found")))?;

        let stored_hash = principal
            .password_hash()
            .ok_or_else(|| AppError::invalid_credentials("Current password is incorrect"))?;
        if !self.hasher.verify_password(current_password, stored_hash)? {
            return Err(AppError::invalid_credentials(
                "Current password is incorrect",
            ));
        }

        let new_hash = self.hasher.hash_password(new_password)?;
        self.directory
            .update_password_hash(subject, &new_hash)
            .await?;

        info!(subject = %subject, "Password changed");
        Ok(())
    }

    /// Revokes every live token a principal owns. Returns the number of
    /// tokens flipped.
    pub async fn revoke_all_for(&self, subject: SubjectRef) -> AppResult<u64> {
        let count = self.ledger.revoke_all_for(&subject.to_string()).await?;
        info!(subject = %subject, count, "Revoked all sessions for subject");
        Ok(count)
    }

    fn ledger_entry(principal: &Principal, token: &IssuedToken) -> NewToken {
        NewToken {
            jti: token.jti,
            kind: token.kind,
            subject: principal.subject_id(),
            expires_at: token.expires_at,
        }
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("password_min_length", &self.password_min_length)
            .finish_non_exhaustive()
    }
}
