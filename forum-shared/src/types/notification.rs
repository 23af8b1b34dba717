use crate::types::{AnswerId, QuestionId, VoteDirection};
use serde_json::{json, Value};

/// A push notification event addressed to a content owner.
///
/// Events are published fire-and-forget to the recipient's channel; delivery
/// is not guaranteed and publish failure never aborts the primary operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    /// A vote was recorded or switched on the recipient's answer.
    NewVote {
        direction: VoteDirection,
        answer_id: AnswerId,
        question_id: QuestionId,
    },
    /// A top-level answer was posted on the recipient's question.
    NewAnswer {
        user_name: String,
        question_title: String,
        question_id: QuestionId,
        answer_id: AnswerId,
    },
    /// A reply was posted under the recipient's answer.
    NewReply {
        user_name: String,
        question_id: QuestionId,
        answer_id: AnswerId,
        is_question_owner: bool,
    },
}

impl NotificationEvent {
    /// The event name published alongside the payload.
    pub fn event_name(&self) -> &'static str {
        match self {
            NotificationEvent::NewVote { .. } => "new-vote",
            NotificationEvent::NewAnswer { .. } => "new-answer",
            NotificationEvent::NewReply { .. } => "new-reply",
        }
    }

    /// The JSON payload published to the recipient's channel.
    pub fn payload(&self) -> Value {
        match self {
            NotificationEvent::NewVote {
                direction,
                answer_id,
                question_id,
            } => json!({
                "voteType": direction.as_str(),
                "answerId": answer_id,
                "questionId": question_id,
            }),
            NotificationEvent::NewAnswer {
                user_name,
                question_title,
                question_id,
                answer_id,
            } => json!({
                "userName": user_name,
                "questionTitle": question_title,
                "questionId": question_id,
                "answerId": answer_id,
            }),
            NotificationEvent::NewReply {
                user_name,
                question_id,
                answer_id,
                is_question_owner,
            } => json!({
                "userName": user_name,
                "questionId": question_id,
                "answerId": answer_id,
                "isQuestionOwner": is_question_owner,
            }),
        }
    }
}

/// Channel key for a recipient, derived from their email.
pub fn notification_channel(email: &str) -> String {
    format!("user-{email}")
}
