//! Repository implementations for the Tempus entities.

pub mod company;
pub mod token;
pub mod user;

pub use company::CompanyRepository;
pub use token::TokenRepository;
pub use user::UserRepository;
