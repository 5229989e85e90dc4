//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available to users within a company.
///
/// The set is closed: unknown role strings are rejected at the boundary
/// instead of being stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Company administrator.
    Admin,
    /// Approves timesheets and manages projects.
    Manager,
    /// Regular salaried employee.
    Employee,
    /// External contractor.
    Contractor,
}

impl Role {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role can approve timesheets.
    pub fn can_approve(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Employee => "employee",
            Self::Contractor => "contractor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = tempus_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "employee" => Ok(Self::Employee),
            "contractor" => Ok(Self::Contractor),
            _ => Err(tempus_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: admin, manager, employee, contractor"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("CONTRACTOR".parse::<Role>().unwrap(), Role::Contractor);
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_approval_rights() {
        assert!(Role::Manager.can_approve());
        assert!(Role::Admin.can_approve());
        assert!(!Role::Employee.can_approve());
        assert!(!Role::Contractor.can_approve());
    }
}
