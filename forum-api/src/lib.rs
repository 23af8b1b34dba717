//! # Forum API
//!
//! HTTP boundary for the forum: a thin axum layer over the vote ledger and
//! the content service. Handlers authenticate the caller, translate wire
//! payloads into service calls, and map service errors onto HTTP statuses.
pub mod config;
pub mod errors;
pub mod http;

pub use config::Dependencies;
pub use errors::{ApiError, StartupError};
