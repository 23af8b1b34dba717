//! PostgreSQL implementation of the content repository.
//!
//! Question creation runs inside a transaction so the question row, tag
//! upserts, and tag links land atomically. Read paths fetch flat rows; the
//! reply tree is rebuilt by the projection layer, never by recursive queries.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use forum_shared::types::{
    AnswerId, AnswerRecord, Author, Identity, NewAnswer, NewQuestion, Question, QuestionId,
    QuestionOwner, QuestionSummary, TagId, UserId,
};
use sqlx::FromRow;
use std::collections::HashMap;

use crate::{ContentRepository, ContentRepositoryError};

#[derive(FromRow)]
struct IdentityRow {
    id: UserId,
    email: String,
}

#[derive(FromRow)]
struct AuthorRow {
    id: UserId,
    name: String,
    email: String,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

#[derive(FromRow)]
struct QuestionRow {
    id: QuestionId,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
    author_id: UserId,
    author_name: String,
    author_email: String,
}

impl QuestionRow {
    fn into_question(self, tags: Vec<String>) -> Question {
        Question {
            id: self.id,
            title: self.title,
            description: self.description,
            author: Author {
                id: self.author_id,
                name: self.author_name,
                email: self.author_email,
            },
            tags,
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct AnswerRow {
    id: AnswerId,
    question_id: QuestionId,
    parent_id: Option<AnswerId>,
    content: String,
    created_at: DateTime<Utc>,
    author_id: UserId,
    author_name: String,
    author_email: String,
}

impl From<AnswerRow> for AnswerRecord {
    fn from(row: AnswerRow) -> Self {
        AnswerRecord {
            id: row.id,
            question_id: row.question_id,
            parent_id: row.parent_id,
            content: row.content,
            author: Author {
                id: row.author_id,
                name: row.author_name,
                email: row.author_email,
            },
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct QuestionTagRow {
    question_id: QuestionId,
    name: String,
}

#[derive(FromRow)]
struct QuestionOwnerRow {
    id: UserId,
    email: String,
    title: String,
}

const QUESTION_SELECT: &str = "SELECT q.id, q.title, q.description, q.created_at,
        u.id AS author_id, u.name AS author_name, u.email AS author_email
     FROM questions q
     JOIN users u ON u.id = q.user_id";

const ANSWER_SELECT: &str = "SELECT a.id, a.question_id, a.parent_id, a.content, a.created_at,
        u.id AS author_id, u.name AS author_name, u.email AS author_email
     FROM answers a
     JOIN users u ON u.id = a.user_id";

/// PostgreSQL implementation of the content repository.
pub struct PostgresContentRepository {
    pool: sqlx::PgPool,
}

impl PostgresContentRepository {
    /// Creates a new repository instance over a configured connection pool.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    /// Fetches tag names for a set of questions in one query, grouped by
    /// question id.
    async fn tags_for_questions(
        &self,
        question_ids: &[QuestionId],
    ) -> Result<HashMap<QuestionId, Vec<String>>, ContentRepositoryError> {
        if question_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<QuestionTagRow> = sqlx::query_as(
            "SELECT qt.question_id, t.name
             FROM question_tags qt
             JOIN tags t ON t.id = qt.tag_id
             WHERE qt.question_id = ANY($1)
             ORDER BY t.name",
        )
        .bind(question_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<QuestionId, Vec<String>> = HashMap::new();
        for row in rows {
            grouped.entry(row.question_id).or_default().push(row.name);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn resolve_session(
        &self,
        token: &str,
    ) -> Result<Option<Identity>, ContentRepositoryError> {
        let row: Option<IdentityRow> = sqlx::query_as(
            "SELECT u.id, u.email
             FROM sessions s
             JOIN users u ON u.id = s.user_id
             WHERE s.token = $1
               AND (s.expires_at IS NULL OR s.expires_at > now())",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Identity {
            id: r.id,
            email: r.email,
        }))
    }

    async fn create_question(
        &self,
        author_id: UserId,
        new: &NewQuestion,
    ) -> Result<Question, ContentRepositoryError> {
        let mut tx = self.pool.begin().await?;

        let (question_id, created_at): (QuestionId, DateTime<Utc>) = sqlx::query_as(
            "INSERT INTO questions (user_id, title, description)
             VALUES ($1, $2, $3)
             RETURNING id, created_at",
        )
        .bind(author_id)
        .bind(&new.title)
        .bind(&new.description)
        .fetch_one(&mut *tx)
        .await?;

        let mut tags = Vec::with_capacity(new.tags.len());
        for tag_name in &new.tags {
            let (tag_id,): (TagId,) = sqlx::query_as(
                "INSERT INTO tags (name) VALUES ($1)
                 ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
                 RETURNING id",
            )
            .bind(tag_name)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                "INSERT INTO question_tags (question_id, tag_id) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(question_id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await?;

            tags.push(tag_name.clone());
        }

        let author: AuthorRow =
            sqlx::query_as("SELECT id, name, email FROM users WHERE id = $1")
                .bind(author_id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(Question {
            id: question_id,
            title: new.title.clone(),
            description: new.description.clone(),
            author: author.into(),
            tags,
            created_at,
        })
    }

    async fn list_questions(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<QuestionSummary>, ContentRepositoryError> {
        let rows: Vec<QuestionRow> = sqlx::query_as(&format!(
            "{QUESTION_SELECT} ORDER BY q.created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<QuestionId> = rows.iter().map(|r| r.id).collect();
        let mut tags = self.tags_for_questions(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let question_tags = tags.remove(&row.id).unwrap_or_default();
                row.into_question(question_tags)
            })
            .collect())
    }

    async fn count_questions(&self) -> Result<u64, ContentRepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn find_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Option<QuestionSummary>, ContentRepositoryError> {
        let row: Option<QuestionRow> =
            sqlx::query_as(&format!("{QUESTION_SELECT} WHERE q.id = $1"))
                .bind(question_id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut tags = self.tags_for_questions(&[row.id]).await?;
        let question_tags = tags.remove(&row.id).unwrap_or_default();
        Ok(Some(row.into_question(question_tags)))
    }

    async fn find_question_owner(
        &self,
        question_id: QuestionId,
    ) -> Result<Option<QuestionOwner>, ContentRepositoryError> {
        let row: Option<QuestionOwnerRow> = sqlx::query_as(
            "SELECT u.id, u.email, q.title
             FROM questions q
             JOIN users u ON u.id = q.user_id
             WHERE q.id = $1",
        )
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| QuestionOwner {
            id: r.id,
            email: r.email,
            title: r.title,
        }))
    }

    async fn create_answer(
        &self,
        author_id: UserId,
        new: &NewAnswer,
    ) -> Result<AnswerRecord, ContentRepositoryError> {
        let (answer_id, created_at): (AnswerId, DateTime<Utc>) = sqlx::query_as(
            "INSERT INTO answers (question_id, user_id, parent_id, content)
             VALUES ($1, $2, $3, $4)
             RETURNING id, created_at",
        )
        .bind(new.question_id)
        .bind(author_id)
        .bind(new.parent_id)
        .bind(&new.content)
        .fetch_one(&self.pool)
        .await?;

        let author: AuthorRow =
            sqlx::query_as("SELECT id, name, email FROM users WHERE id = $1")
                .bind(author_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(AnswerRecord {
            id: answer_id,
            question_id: new.question_id,
            parent_id: new.parent_id,
            content: new.content.clone(),
            author: author.into(),
            created_at,
        })
    }

    async fn find_answer(
        &self,
        answer_id: AnswerId,
    ) -> Result<Option<AnswerRecord>, ContentRepositoryError> {
        let row: Option<AnswerRow> =
            sqlx::query_as(&format!("{ANSWER_SELECT} WHERE a.id = $1"))
                .bind(answer_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn list_answers_for_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<AnswerRecord>, ContentRepositoryError> {
        let rows: Vec<AnswerRow> = sqlx::query_as(&format!(
            "{ANSWER_SELECT} WHERE a.question_id = $1 ORDER BY a.created_at"
        ))
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
