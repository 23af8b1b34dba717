//! # Forum Repository
//! This crate provides traits and implementations for interacting with the
//! forum data store. It includes definitions for errors, interfaces, and
//! concrete implementations for PostgreSQL.
pub mod errors;
pub mod interfaces;
pub mod postgres;

pub use errors::{ContentRepositoryError, VoteRepositoryError};
pub use interfaces::{ContentRepository, VoteRepository};
pub use postgres::{PostgresContentRepository, PostgresVoteRepository};
