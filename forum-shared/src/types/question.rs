use crate::types::{Author, QuestionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A question as stored, with author attribution and tags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub description: String,
    pub author: Author,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Listing projection of a question. Same shape as [`Question`] today; kept
/// separate so the list path can shed fields without touching the detail path.
pub type QuestionSummary = Question;

/// Input for creating a question.
#[derive(Debug, Clone, Deserialize)]
pub struct NewQuestion {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Pagination envelope for question listings.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// Builds the envelope, rounding the page count up.
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = total.div_ceil(limit.max(1) as u64);
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}
