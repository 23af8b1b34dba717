//! Error types for the content service.
use forum_repository::{ContentRepositoryError, VoteRepositoryError};
use forum_shared::types::{AnswerId, QuestionId};
use thiserror::Error;

/// Represents errors that can occur while creating or reading forum content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Question not found")]
    QuestionNotFound(QuestionId),

    #[error("Parent answer not found")]
    ParentAnswerNotFound(AnswerId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Content repository error: {0}")]
    Repository(#[from] ContentRepositoryError),

    #[error("Vote repository error: {0}")]
    VoteRepository(#[from] VoteRepositoryError),
}
