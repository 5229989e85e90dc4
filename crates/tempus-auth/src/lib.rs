//! # tempus-auth
//!
//! The authentication core of the Tempus timesheet backend.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and verification
//! - `jwt` — RS256 token claims, encoding, and decoding
//! - `ledger` — persisted record of every issued token; source of truth
//!   for revocation
//! - `directory` — principal lookup (users and companies)
//! - `session` — login, logout, refresh, and password-change flows

pub mod directory;
pub mod jwt;
pub mod ledger;
pub mod password;
pub mod session;

pub use directory::PrincipalDirectory;
pub use jwt::{Claims, IssuedToken, TokenDecoder, TokenEncoder};
pub use ledger::TokenLedger;
pub use password::PasswordHasher;
pub use session::{Session, SessionManager};
