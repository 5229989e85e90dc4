//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Authentication and token configuration.
///
/// Tokens are signed with an RSA key pair: the private key stays on the
/// issuing node, the public key is all a verifier needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Path to the PEM-encoded RSA private key (signing).
    #[serde(default = "default_private_key_path")]
    pub private_key_path: String,
    /// Path to the PEM-encoded RSA public key (verification).
    #[serde(default = "default_public_key_path")]
    pub public_key_path: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

/// RSA key pair material loaded from disk.
///
/// Passed explicitly to the token codec at construction; nothing in the
/// application holds key state globally.
#[derive(Clone)]
pub struct KeyMaterial {
    /// PEM-encoded RSA private key.
    pub private_pem: String,
    /// PEM-encoded RSA public key.
    pub public_pem: String,
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial").finish_non_exhaustive()
    }
}

impl AuthConfig {
    /// Read the configured key pair from disk.
    pub fn load_keys(&self) -> Result<KeyMaterial, AppError> {
        let private_pem = std::fs::read_to_string(&self.private_key_path).map_err(|e| {
            AppError::configuration(format!(
                "Failed to read private key '{}': {e}",
                self.private_key_path
            ))
        })?;
        let public_pem = std::fs::read_to_string(&self.public_key_path).map_err(|e| {
            AppError::configuration(format!(
                "Failed to read public key '{}': {e}",
                self.public_key_path
            ))
        })?;
        Ok(KeyMaterial {
            private_pem,
            public_pem,
        })
    }
}

fn default_private_key_path() -> String {
    "config/private.pem".to_string()
}

fn default_public_key_path() -> String {
    "config/public.pem".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_password_min() -> usize {
    8
}
