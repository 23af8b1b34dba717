use crate::types::{AnswerId, Author, QuestionId, VoteDirection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An answer row as stored: one node of the reply tree, flat.
///
/// Replies form a strict parent-pointer tree rooted at top-level answers
/// (`parent_id` is `None`). The tree shape is rebuilt at read time by the
/// projection layer; nothing recursive is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerRecord {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub parent_id: Option<AnswerId>,
    pub content: String,
    pub author: Author,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an answer or a nested reply.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAnswer {
    pub content: String,
    pub question_id: QuestionId,
    #[serde(default)]
    pub parent_id: Option<AnswerId>,
}

/// Read-time projection of one answer node: vote tallies, the viewer's own
/// direction, and the projected replies beneath it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AnswerView {
    pub id: AnswerId,
    pub content: String,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub upvotes: u64,
    pub downvotes: u64,
    pub score: i64,
    pub viewer_vote: Option<VoteDirection>,
    pub replies: Vec<AnswerView>,
}
