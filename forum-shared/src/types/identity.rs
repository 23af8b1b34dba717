use crate::types::{QuestionId, UserId};
use serde::{Deserialize, Serialize};

/// A resolved user identity.
///
/// Produced by the identity layer from an opaque session token and passed
/// into services explicitly as a parameter, never read from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
}

/// Public author attribution attached to questions and answers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// The owner of an answer, as resolved for notification routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOwner {
    pub id: UserId,
    pub email: String,
    pub question_id: QuestionId,
}

/// The owner of a question, as resolved for notification routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOwner {
    pub id: UserId,
    pub email: String,
    pub title: String,
}
