//! Error types for the vote repository.
//! Defines specific errors that can occur during database operations on votes.
use forum_shared::types::{AnswerId, UserId};
use thiserror::Error;

/// Represents errors that can occur within the vote repository.
///
/// The unique-key violation on create is surfaced as its own variant so the
/// ledger can map a concurrent-create race to a distinct conflict outcome
/// instead of a generic database failure.
#[derive(Debug, Error)]
pub enum VoteRepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Vote already exists for voter {voter_id} on answer {answer_id}")]
    DuplicateVote {
        voter_id: UserId,
        answer_id: AnswerId,
    },

    #[error("Invalid vote direction stored: {0}")]
    InvalidStoredDirection(i16),
}
