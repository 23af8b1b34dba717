use uuid::Uuid;

/// Identifier of a registered user.
pub type UserId = Uuid;
/// Identifier of a question.
pub type QuestionId = Uuid;
/// Identifier of an answer (top-level or nested reply).
pub type AnswerId = Uuid;
/// Identifier of a tag.
pub type TagId = Uuid;
