//! In-memory principal directory for tests and single-node development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tempus_core::{AppError, AppResult};
use tempus_entity::principal::{Principal, SubjectRef};

use super::PrincipalDirectory;

/// Directory holding principals in a mutex-guarded map.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrincipalDirectory {
    principals: Arc<Mutex<HashMap<SubjectRef, Principal>>>,
}

impl MemoryPrincipalDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a principal, keyed by its subject identity.
    pub async fn insert(&self, principal: Principal) {
        let mut principals = self.principals.lock().await;
        principals.insert(principal.subject_ref(), principal);
    }
}

#[async_trait]
impl PrincipalDirectory for MemoryPrincipalDirectory {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Principal>> {
        let principals = self.principals.lock().await;
        // Users win over companies, matching the lookup order of the
        // database-backed directory.
        let user = principals.values().find(|p| {
            matches!(p, Principal::User(_)) && p.email().eq_ignore_ascii_case(email)
        });
        let found = user.or_else(|| {
            principals
                .values()
                .find(|p| p.email().eq_ignore_ascii_case(email))
        });
        Ok(found.cloned())
    }

    async fn find_by_subject(&self, subject: SubjectRef) -> AppResult<Option<Principal>> {
        let principals = self.principals.lock().await;
        Ok(principals.get(&subject).cloned())
    }

    async fn update_password_hash(&self, subject: SubjectRef, hash: &str) -> AppResult<()> {
        let mut principals = self.principals.lock().await;
        match principals.get_mut(&subject) {
            Some(Principal::User(user)) => {
                user.password_hash = hash.to_string();
                Ok(())
            }
            Some(Principal::Company(company)) => {
                company.password_hash = Some(hash.to_string());
                Ok(())
            }
            None => Err(AppError::not_found(format!("Subject {subject} not found"))),
        }
    }
}
