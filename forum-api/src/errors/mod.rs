//! Error types for the API binary: startup failures and the HTTP error
//! surface that service errors map onto.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use forum_ledger::{ContentError, LedgerError};
use serde_json::json;
use thiserror::Error;

use crate::config::ConfigError;

/// Failure while bringing the service up.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("kafka producer error: {0}")]
    Kafka(#[from] forum_kafka::ProducerError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// An error as surfaced to HTTP clients.
///
/// Each variant carries a client-safe message and maps to exactly one status
/// code. Repository and transport failures collapse into `Internal`; their
/// detail goes to the logs, never to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthenticated,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AnswerNotFound(_) => ApiError::NotFound("Answer not found".to_string()),
            LedgerError::Conflict(_) => {
                ApiError::Conflict("Vote already recorded by a concurrent request".to_string())
            }
            LedgerError::Repository(e) => {
                tracing::error!(error = %e, "vote repository failure");
                ApiError::Internal
            }
        }
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::QuestionNotFound(_) => {
                ApiError::NotFound("Question not found".to_string())
            }
            ContentError::ParentAnswerNotFound(_) => {
                ApiError::NotFound("Parent answer not found".to_string())
            }
            ContentError::InvalidInput(message) => ApiError::InvalidInput(message),
            ContentError::Repository(e) => {
                tracing::error!(error = %e, "content repository failure");
                ApiError::Internal
            }
            ContentError::VoteRepository(e) => {
                tracing::error!(error = %e, "vote repository failure");
                ApiError::Internal
            }
        }
    }
}
