//! The content service: questions, answers, and their read projections.
//!
//! Like the vote ledger, mutations that concern another user emit a
//! best-effort notification whose result is reported alongside the primary
//! outcome, never in place of it.
use crate::errors::ContentError;
use crate::notifier::{publish_best_effort, NotificationPublisher, NotificationStatus, SkipReason};
use crate::projection::project_answer_tree;
use forum_repository::{ContentRepository, VoteRepository};
use forum_shared::types::{
    AnswerRecord, AnswerView, Identity, NewAnswer, NewQuestion, NotificationEvent, Pagination,
    Question, QuestionId, QuestionSummary,
};
use std::sync::Arc;
use tracing::instrument;

/// One page of the question listing.
#[derive(Debug, Clone)]
pub struct QuestionPage {
    pub questions: Vec<QuestionSummary>,
    pub pagination: Pagination,
}

/// A question with its fully projected answer tree.
#[derive(Debug, Clone)]
pub struct QuestionDetail {
    pub question: QuestionSummary,
    pub answers: Vec<AnswerView>,
}

/// Questions and answers over the content store, with vote projections on
/// the read path and owner notifications on the write path.
pub struct ContentService {
    content: Arc<dyn ContentRepository>,
    votes: Arc<dyn VoteRepository>,
    publisher: Arc<dyn NotificationPublisher>,
}

impl ContentService {
    pub fn new(
        content: Arc<dyn ContentRepository>,
        votes: Arc<dyn VoteRepository>,
        publisher: Arc<dyn NotificationPublisher>,
    ) -> Self {
        Self {
            content,
            votes,
            publisher,
        }
    }

    /// Resolves an opaque session token to an identity, if the session is live.
    pub async fn resolve_session(&self, token: &str) -> Result<Option<Identity>, ContentError> {
        Ok(self.content.resolve_session(token).await?)
    }

    /// Creates a question. Title and description are required.
    #[instrument(skip(self, author, new), fields(author_id = %author.id))]
    pub async fn create_question(
        &self,
        author: &Identity,
        new: NewQuestion,
    ) -> Result<Question, ContentError> {
        if new.title.trim().is_empty() || new.description.trim().is_empty() {
            return Err(ContentError::InvalidInput(
                "Title and description are required".to_string(),
            ));
        }
        Ok(self.content.create_question(author.id, &new).await?)
    }

    /// Lists questions newest-first with a pagination envelope.
    pub async fn list_questions(&self, page: u32, limit: u32) -> Result<QuestionPage, ContentError> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        let offset = ((page - 1) as i64) * (limit as i64);

        let questions = self.content.list_questions(offset, limit as i64).await?;
        let total = self.content.count_questions().await?;

        Ok(QuestionPage {
            questions,
            pagination: Pagination::new(page, limit, total),
        })
    }

    /// Fetches a question with its projected answer tree.
    ///
    /// The viewer, when present, gets their own vote direction on every node;
    /// anonymous viewers get `None`. Answers and votes are fetched flat and
    /// grouped in one pass each.
    #[instrument(skip(self, viewer))]
    pub async fn question_detail(
        &self,
        question_id: QuestionId,
        viewer: Option<&Identity>,
    ) -> Result<QuestionDetail, ContentError> {
        let question = self
            .content
            .find_question(question_id)
            .await?
            .ok_or(ContentError::QuestionNotFound(question_id))?;

        let answers = self.content.list_answers_for_question(question_id).await?;
        let votes = self.votes.list_votes_for_question(question_id).await?;
        let answers = project_answer_tree(answers, &votes, viewer.map(|v| v.id));

        Ok(QuestionDetail { question, answers })
    }

    /// Creates an answer or a nested reply.
    ///
    /// The question must exist; `parent_id`, when given, must reference an
    /// existing answer on the same question. Top-level answers notify the
    /// question owner (`new-answer`), replies notify the parent answer's
    /// owner (`new-reply`); self-directed notifications are skipped.
    #[instrument(skip(self, author, new), fields(author_id = %author.id, question_id = %new.question_id))]
    pub async fn create_answer(
        &self,
        author: &Identity,
        new: NewAnswer,
    ) -> Result<(AnswerRecord, NotificationStatus), ContentError> {
        if new.content.trim().is_empty() {
            return Err(ContentError::InvalidInput("Content is required".to_string()));
        }

        let question_owner = self
            .content
            .find_question_owner(new.question_id)
            .await?
            .ok_or(ContentError::QuestionNotFound(new.question_id))?;

        if let Some(parent_id) = new.parent_id {
            let parent = self
                .content
                .find_answer(parent_id)
                .await?
                .ok_or(ContentError::ParentAnswerNotFound(parent_id))?;
            if parent.question_id != new.question_id {
                return Err(ContentError::InvalidInput(
                    "Parent answer belongs to a different question".to_string(),
                ));
            }
        }

        let record = self.content.create_answer(author.id, &new).await?;

        let notification = match new.parent_id {
            None => {
                if question_owner.id == author.id {
                    NotificationStatus::Skipped(SkipReason::SelfDirected)
                } else {
                    let event = NotificationEvent::NewAnswer {
                        user_name: record.author.name.clone(),
                        question_title: question_owner.title.clone(),
                        question_id: record.question_id,
                        answer_id: record.id,
                    };
                    publish_best_effort(self.publisher.as_ref(), &question_owner.email, &event)
                        .await
                }
            }
            Some(parent_id) => {
                // Owner resolved after the insert; the parent was verified above.
                match self.votes.find_answer_owner(parent_id).await? {
                    Some(parent_owner) if parent_owner.id == author.id => {
                        NotificationStatus::Skipped(SkipReason::SelfDirected)
                    }
                    Some(parent_owner) => {
                        let event = NotificationEvent::NewReply {
                            user_name: record.author.name.clone(),
                            question_id: record.question_id,
                            answer_id: record.id,
                            is_question_owner: parent_owner.id == question_owner.id,
                        };
                        publish_best_effort(self.publisher.as_ref(), &parent_owner.email, &event)
                            .await
                    }
                    None => NotificationStatus::Failed,
                }
            }
        };

        Ok((record, notification))
    }
}
