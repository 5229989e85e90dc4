//! PostgreSQL-backed principal directory.

use std::sync::Arc;

use async_trait::async_trait;

use tempus_core::AppResult;
use tempus_database::repositories::company::CompanyRepository;
use tempus_database::repositories::user::UserRepository;
use tempus_entity::principal::{Principal, SubjectRef};

use super::PrincipalDirectory;

/// Directory over the `users` and `companies` tables.
#[derive(Debug, Clone)]
pub struct PostgresPrincipalDirectory {
    users: Arc<UserRepository>,
    companies: Arc<CompanyRepository>,
}

impl PostgresPrincipalDirectory {
    /// Creates a directory over the two repositories.
    pub fn new(users: Arc<UserRepository>, companies: Arc<CompanyRepository>) -> Self {
        Self { users, companies }
    }
}

#[async_trait]
impl PrincipalDirectory for PostgresPrincipalDirectory {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Principal>> {
        if let Some(user) = self.users.find_by_email(email).await? {
            return Ok(Some(Principal::User(user)));
        }
        if let Some(company) = self.companies.find_by_contact_email(email).await? {
            return Ok(Some(Principal::Company(company)));
        }
        Ok(None)
    }

    async fn find_by_subject(&self, subject: SubjectRef) -> AppResult<Option<Principal>> {
        match subject {
            SubjectRef::User(id) => Ok(self.users.find_by_id(id).await?.map(Principal::User)),
            SubjectRef::Company(id) => Ok(self
                .companies
                .find_by_id(id)
                .await?
                .map(Principal::Company)),
        }
    }

    async fn update_password_hash(&self, subject: SubjectRef, hash: &str) -> AppResult<()> {
        match subject {
            SubjectRef::User(id) => self.users.update_password(id, hash).await,
            SubjectRef::Company(id) => self.companies.update_password(id, hash).await,
        }
    }
}
