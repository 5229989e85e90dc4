//! # tempus-entity
//!
//! Domain entity models for the Tempus timesheet backend: the two
//! principal kinds (companies and users), the role enumeration, and the
//! token ledger row.

pub mod company;
pub mod principal;
pub mod token;
pub mod user;

pub use company::Company;
pub use principal::{Principal, SubjectRef};
pub use token::{NewToken, TokenKind, TokenRecord};
pub use user::{Role, User};
