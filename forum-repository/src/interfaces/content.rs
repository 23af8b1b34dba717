//! This module defines the `ContentRepository` trait, the interface to the
//! data store for users, sessions, questions, tags, and answers.
use crate::errors::ContentRepositoryError;
use forum_shared::types::{
    AnswerId, AnswerRecord, Identity, NewAnswer, NewQuestion, Question, QuestionId, QuestionOwner,
    QuestionSummary, UserId,
};

/// A trait that defines the interface for interacting with forum content.
///
/// Covers identity resolution (opaque session token to user identity) and the
/// question/answer surface. Vote persistence lives in [`crate::VoteRepository`].
#[async_trait::async_trait]
pub trait ContentRepository: Send + Sync {
    /// Resolves an opaque session token to a user identity.
    ///
    /// # Returns
    ///
    /// `Ok(Some(Identity))` for a live session, `Ok(None)` for an unknown or
    /// expired token.
    async fn resolve_session(
        &self,
        token: &str,
    ) -> Result<Option<Identity>, ContentRepositoryError>;

    /// Creates a question, upserting and linking its tags.
    async fn create_question(
        &self,
        author_id: UserId,
        new: &NewQuestion,
    ) -> Result<Question, ContentRepositoryError>;

    /// Lists questions newest-first with author attribution and tags.
    async fn list_questions(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<QuestionSummary>, ContentRepositoryError>;

    /// Counts all questions, for pagination envelopes.
    async fn count_questions(&self) -> Result<u64, ContentRepositoryError>;

    /// Fetches a single question with author attribution and tags.
    async fn find_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Option<QuestionSummary>, ContentRepositoryError>;

    /// Resolves the owner of a question for notification routing.
    async fn find_question_owner(
        &self,
        question_id: QuestionId,
    ) -> Result<Option<QuestionOwner>, ContentRepositoryError>;

    /// Creates an answer (top-level when `parent_id` is absent, a reply
    /// otherwise) and returns the stored record with author attribution.
    async fn create_answer(
        &self,
        author_id: UserId,
        new: &NewAnswer,
    ) -> Result<AnswerRecord, ContentRepositoryError>;

    /// Fetches a single answer row.
    async fn find_answer(
        &self,
        answer_id: AnswerId,
    ) -> Result<Option<AnswerRecord>, ContentRepositoryError>;

    /// Lists every answer of a question, flat; the projection layer rebuilds
    /// the reply tree from `parent_id` references.
    async fn list_answers_for_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<AnswerRecord>, ContentRepositoryError>;
}
