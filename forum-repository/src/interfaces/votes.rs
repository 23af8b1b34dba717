//! This module defines the `VoteRepository` trait, which provides an interface
//! for interacting with the underlying data store for votes and answer
//! ownership. It abstracts the database operations for persistence and retrieval.
use crate::errors::VoteRepositoryError;
use forum_shared::types::{AnswerId, AnswerOwner, QuestionId, UserId, Vote, VoteDirection};

/// A trait that defines the interface for interacting with the vote store.
///
/// Implementors provide the persistence primitives the vote ledger composes:
/// find, create, update, and delete keyed by the composite (voter, answer)
/// pair, plus the answer-owner lookup used for notification routing.
#[async_trait::async_trait]
pub trait VoteRepository: Send + Sync {
    /// Finds the live vote for a (voter, answer) pair, if any.
    ///
    /// # Arguments
    ///
    /// * `voter_id` - The voter half of the composite key.
    /// * `answer_id` - The answer half of the composite key.
    ///
    /// # Returns
    ///
    /// `Ok(Some(Vote))` when a vote exists, `Ok(None)` otherwise, or a
    /// `VoteRepositoryError` if the lookup fails.
    async fn find_vote(
        &self,
        voter_id: UserId,
        answer_id: AnswerId,
    ) -> Result<Option<Vote>, VoteRepositoryError>;

    /// Creates a new vote for a (voter, answer) pair.
    ///
    /// The store enforces the composite unique key; a concurrent create for
    /// the same pair fails with `VoteRepositoryError::DuplicateVote` rather
    /// than a generic database error.
    async fn create_vote(
        &self,
        voter_id: UserId,
        answer_id: AnswerId,
        direction: VoteDirection,
    ) -> Result<(), VoteRepositoryError>;

    /// Flips the direction of an existing vote.
    async fn update_vote_direction(
        &self,
        voter_id: UserId,
        answer_id: AnswerId,
        direction: VoteDirection,
    ) -> Result<(), VoteRepositoryError>;

    /// Deletes the vote for a (voter, answer) pair, if present.
    async fn delete_vote(
        &self,
        voter_id: UserId,
        answer_id: AnswerId,
    ) -> Result<(), VoteRepositoryError>;

    /// Resolves the owner of an answer for notification routing.
    ///
    /// # Returns
    ///
    /// `Ok(Some(AnswerOwner))` with the owner's id, email, and the id of the
    /// question the answer belongs to, or `Ok(None)` for an unknown answer.
    async fn find_answer_owner(
        &self,
        answer_id: AnswerId,
    ) -> Result<Option<AnswerOwner>, VoteRepositoryError>;

    /// Lists every vote on every answer of a question, flat.
    ///
    /// Used by the read path to project vote tallies over the full reply tree
    /// in one pass instead of one query per node.
    async fn list_votes_for_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<Vote>, VoteRepositoryError>;
}
