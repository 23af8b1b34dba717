//! PostgreSQL implementation of the vote repository.
//!
//! Votes are keyed by the composite primary key (user_id, answer_id); the
//! database constraint, not application locking, enforces the at-most-one
//! invariant. Directions are stored as SMALLINT (0 = up, 1 = down).
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use forum_shared::types::{AnswerId, AnswerOwner, QuestionId, UserId, Vote, VoteDirection};
use sqlx::FromRow;

use crate::{VoteRepository, VoteRepositoryError};

const DIRECTION_UP: i16 = 0;
const DIRECTION_DOWN: i16 = 1;

fn direction_to_i16(direction: VoteDirection) -> i16 {
    match direction {
        VoteDirection::Up => DIRECTION_UP,
        VoteDirection::Down => DIRECTION_DOWN,
    }
}

fn direction_from_i16(raw: i16) -> Result<VoteDirection, VoteRepositoryError> {
    match raw {
        DIRECTION_UP => Ok(VoteDirection::Up),
        DIRECTION_DOWN => Ok(VoteDirection::Down),
        other => Err(VoteRepositoryError::InvalidStoredDirection(other)),
    }
}

#[derive(FromRow)]
struct VoteRow {
    user_id: UserId,
    answer_id: AnswerId,
    direction: i16,
    voted_at: DateTime<Utc>,
}

impl VoteRow {
    fn into_vote(self) -> Result<Vote, VoteRepositoryError> {
        Ok(Vote {
            voter_id: self.user_id,
            answer_id: self.answer_id,
            direction: direction_from_i16(self.direction)?,
            voted_at: self.voted_at,
        })
    }
}

#[derive(FromRow)]
struct AnswerOwnerRow {
    id: UserId,
    email: String,
    question_id: QuestionId,
}

/// PostgreSQL implementation of the vote repository.
///
/// Operates on a shared `sqlx::PgPool`; every method is a single statement,
/// so no explicit transactions are needed.
pub struct PostgresVoteRepository {
    pool: sqlx::PgPool,
}

impl PostgresVoteRepository {
    /// Creates a new repository instance over a configured connection pool.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PostgresVoteRepository {
    async fn find_vote(
        &self,
        voter_id: UserId,
        answer_id: AnswerId,
    ) -> Result<Option<Vote>, VoteRepositoryError> {
        let row: Option<VoteRow> = sqlx::query_as(
            "SELECT user_id, answer_id, direction, voted_at
             FROM votes
             WHERE user_id = $1 AND answer_id = $2",
        )
        .bind(voter_id)
        .bind(answer_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(VoteRow::into_vote).transpose()
    }

    async fn create_vote(
        &self,
        voter_id: UserId,
        answer_id: AnswerId,
        direction: VoteDirection,
    ) -> Result<(), VoteRepositoryError> {
        let result = sqlx::query(
            "INSERT INTO votes (user_id, answer_id, direction) VALUES ($1, $2, $3)",
        )
        .bind(voter_id)
        .bind(answer_id)
        .bind(direction_to_i16(direction))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err))
                if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                Err(VoteRepositoryError::DuplicateVote {
                    voter_id,
                    answer_id,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update_vote_direction(
        &self,
        voter_id: UserId,
        answer_id: AnswerId,
        direction: VoteDirection,
    ) -> Result<(), VoteRepositoryError> {
        sqlx::query(
            "UPDATE votes SET direction = $3, voted_at = now()
             WHERE user_id = $1 AND answer_id = $2",
        )
        .bind(voter_id)
        .bind(answer_id)
        .bind(direction_to_i16(direction))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_vote(
        &self,
        voter_id: UserId,
        answer_id: AnswerId,
    ) -> Result<(), VoteRepositoryError> {
        sqlx::query("DELETE FROM votes WHERE user_id = $1 AND answer_id = $2")
            .bind(voter_id)
            .bind(answer_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_answer_owner(
        &self,
        answer_id: AnswerId,
    ) -> Result<Option<AnswerOwner>, VoteRepositoryError> {
        let row: Option<AnswerOwnerRow> = sqlx::query_as(
            "SELECT u.id, u.email, a.question_id
             FROM answers a
             JOIN users u ON u.id = a.user_id
             WHERE a.id = $1",
        )
        .bind(answer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| AnswerOwner {
            id: r.id,
            email: r.email,
            question_id: r.question_id,
        }))
    }

    async fn list_votes_for_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<Vote>, VoteRepositoryError> {
        let rows: Vec<VoteRow> = sqlx::query_as(
            "SELECT v.user_id, v.answer_id, v.direction, v.voted_at
             FROM votes v
             JOIN answers a ON a.id = v.answer_id
             WHERE a.question_id = $1",
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(VoteRow::into_vote).collect()
    }
}
