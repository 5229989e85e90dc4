//! Token validation with the RSA public key.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use tempus_core::config::auth::KeyMaterial;
use tempus_core::error::AppError;
use tempus_entity::token::TokenKind;

use super::claims::Claims;

/// Validates token signatures and expiry.
///
/// Holds only the public half of the key pair; a decoder can be handed to
/// any verifying node without granting it signing capability.
#[derive(Clone)]
pub struct TokenDecoder {
    /// RSA public key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenDecoder {
    /// Creates a new decoder from key material.
    pub fn new(keys: &KeyMaterial) -> Result<Self, AppError> {
        let decoding_key = DecodingKey::from_rsa_pem(keys.public_pem.as_bytes())
            .map_err(|e| AppError::configuration(format!("Invalid RSA public key: {e}")))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Decodes and validates a token string of any kind.
    ///
    /// Checks signature and expiry only; revocation is the ledger's
    /// responsibility. Failures fail closed with a precise kind:
    /// `Expired`, `BadSignature`, or `Malformed`.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::expired("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::bad_signature("Invalid token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                        AppError::bad_signature("Token signed with unexpected algorithm")
                    }
                    _ => AppError::malformed(format!("Invalid token: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Decodes a token and additionally requires it to be of `kind`.
    ///
    /// A kind mismatch is reported as `Malformed`: the presented token is
    /// not a valid credential for the operation at hand.
    pub fn decode_kind(&self, token: &str, kind: TokenKind) -> Result<Claims, AppError> {
        let claims = self.decode(token)?;
        if claims.kind != kind {
            return Err(AppError::malformed(format!(
                "Expected {kind} token, got {}",
                claims.kind
            )));
        }
        Ok(claims)
    }
}
