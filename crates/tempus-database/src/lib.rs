//! # tempus-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for the Tempus principal tables and the token ledger.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
