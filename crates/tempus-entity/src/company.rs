//! Company entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered company (tenant).
///
/// Companies authenticate like users do — a company account logs in with
/// its contact email to manage its own tenant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    /// Unique company identifier.
    pub id: i64,
    /// Company name.
    pub name: String,
    /// Industry sector (optional).
    pub industry: Option<String>,
    /// Email domain, unique across companies.
    pub email_domain: String,
    /// Contact email used for company login.
    pub contact_email: String,
    /// Contact phone number (optional).
    pub contact_number: Option<String>,
    /// Postal address (optional).
    pub address: Option<String>,
    /// Argon2 password hash. Absent for companies that never set one.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// When the company was registered.
    pub created_at: DateTime<Utc>,
}
