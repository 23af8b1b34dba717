//! Error types for the forum repository.
//! Consolidates and re-exports error types related to repository operations.
mod content;
mod votes;

pub use content::ContentRepositoryError;
pub use votes::VoteRepositoryError;
