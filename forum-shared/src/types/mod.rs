//! Shared domain types for the forum.
mod answer;
mod identity;
mod ids;
mod notification;
mod question;
mod vote;

pub use answer::{AnswerRecord, AnswerView, NewAnswer};
pub use identity::{AnswerOwner, Author, Identity, QuestionOwner};
pub use ids::{AnswerId, QuestionId, TagId, UserId};
pub use notification::{notification_channel, NotificationEvent};
pub use question::{NewQuestion, Pagination, Question, QuestionSummary};
pub use vote::{InvalidDirection, Vote, VoteDirection, VoteOutcome};
