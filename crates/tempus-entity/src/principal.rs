//! Principal abstraction over the two authenticating entity kinds.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use tempus_core::AppError;

use crate::company::Company;
use crate::user::{Role, User};

/// Any entity that can authenticate: a user or a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Principal {
    /// A user belonging to a company.
    User(User),
    /// A company account.
    Company(Company),
}

impl Principal {
    /// Stable string identity used as the token subject and the ledger's
    /// owner key. Prefixed with the principal kind because user and
    /// company ids come from separate sequences.
    pub fn subject_id(&self) -> String {
        self.subject_ref().to_string()
    }

    /// Typed reference to this principal's identity.
    pub fn subject_ref(&self) -> SubjectRef {
        match self {
            Self::User(u) => SubjectRef::User(u.id),
            Self::Company(c) => SubjectRef::Company(c.id),
        }
    }

    /// Tenant scope for claims: users carry their company id, a company
    /// is its own tenant.
    pub fn tenant_id(&self) -> i64 {
        match self {
            Self::User(u) => u.company_id,
            Self::Company(c) => c.id,
        }
    }

    /// Role claim. Companies have no role.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::User(u) => Some(u.role),
            Self::Company(_) => None,
        }
    }

    /// Stored password hash, if the principal has one.
    pub fn password_hash(&self) -> Option<&str> {
        match self {
            Self::User(u) => Some(u.password_hash.as_str()),
            Self::Company(c) => c.password_hash.as_deref(),
        }
    }

    /// Email the principal authenticates with.
    pub fn email(&self) -> &str {
        match self {
            Self::User(u) => &u.email,
            Self::Company(c) => &c.contact_email,
        }
    }
}

/// Parsed form of a subject identity string (`user:42` or `company:7`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectRef {
    /// A user principal's id.
    User(i64),
    /// A company principal's id.
    Company(i64),
}

impl std::fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User(id) => write!(f, "user:{id}"),
            Self::Company(id) => write!(f, "company:{id}"),
        }
    }
}

impl FromStr for SubjectRef {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| AppError::malformed(format!("Invalid subject identity: '{s}'")))?;
        let id: i64 = id
            .parse()
            .map_err(|_| AppError::malformed(format!("Invalid subject identity: '{s}'")))?;
        match kind {
            "user" => Ok(Self::User(id)),
            "company" => Ok(Self::Company(id)),
            _ => Err(AppError::malformed(format!(
                "Invalid subject identity: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_round_trip() {
        assert_eq!(
            "user:42".parse::<SubjectRef>().unwrap(),
            SubjectRef::User(42)
        );
        assert_eq!(
            SubjectRef::Company(7).to_string().parse::<SubjectRef>().unwrap(),
            SubjectRef::Company(7)
        );
        assert!("42".parse::<SubjectRef>().is_err());
        assert!("robot:42".parse::<SubjectRef>().is_err());
    }
}
