//! # tempus-core
//!
//! Shared foundations for the Tempus timesheet backend: layered
//! configuration, the unified [`error::AppError`] type, and the
//! [`result::AppResult`] alias used by every other crate.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
