//! Token claims, encoding, and decoding.
//!
//! Tokens are signed with an RSA private key and verified with the public
//! key, so verification can run anywhere without signing capability. The
//! codec is stateless: revocation lives in the [`crate::ledger`].

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::TokenDecoder;
pub use encoder::{IssuedToken, TokenEncoder};
