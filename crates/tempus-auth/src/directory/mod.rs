//! Principal directory — lookup and credential updates for the two
//! principal kinds.
//!
//! The session layer never touches repositories directly; it goes
//! through this trait so flows can be tested against the in-memory
//! implementation.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use tempus_core::AppResult;
use tempus_entity::principal::{Principal, SubjectRef};

pub use memory::MemoryPrincipalDirectory;
pub use postgres::PostgresPrincipalDirectory;

/// Lookup and credential storage for authenticating principals.
#[async_trait]
pub trait PrincipalDirectory: Send + Sync {
    /// Find a principal by login email, case-insensitively. Users are
    /// checked first, then companies by contact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Principal>>;

    /// Resolve a subject identity back to its principal.
    async fn find_by_subject(&self, subject: SubjectRef) -> AppResult<Option<Principal>>;

    /// Replace the stored password hash for a subject. Fails with
    /// `NotFound` when the subject no longer exists.
    async fn update_password_hash(&self, subject: SubjectRef, hash: &str) -> AppResult<()>;
}
