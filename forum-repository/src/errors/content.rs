//! Error types for the content repository.
//! Defines specific errors that can occur during database operations on
//! users, sessions, questions, tags, and answers.
use thiserror::Error;

/// Represents errors that can occur within the content repository.
#[derive(Debug, Error)]
pub enum ContentRepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
