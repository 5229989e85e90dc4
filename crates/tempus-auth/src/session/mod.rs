//! Session flows: login, logout, refresh, and password changes.

pub mod manager;

pub use manager::{Session, SessionManager};
