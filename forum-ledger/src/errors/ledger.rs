//! Error types for the vote ledger.
use forum_repository::VoteRepositoryError;
use forum_shared::types::AnswerId;
use thiserror::Error;

/// Represents errors that can occur while casting a vote.
///
/// Each variant is distinguishable so the boundary layer can map it to a
/// distinct response status. A concurrent create racing on the composite
/// unique key surfaces as `Conflict`, not as a generic store failure.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Answer not found")]
    AnswerNotFound(AnswerId),

    #[error("Concurrent vote for answer {0}")]
    Conflict(AnswerId),

    #[error("Vote repository error: {0}")]
    Repository(#[from] VoteRepositoryError),
}
