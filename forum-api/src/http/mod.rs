//! Routes and handlers.
//!
//! Every mutation requires a bearer session token; `GET` routes accept one
//! optionally so the viewer's own votes can be resolved in projections.
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use forum_ledger::{ContentService, NotificationStatus, VoteLedger};
use forum_shared::types::{AnswerId, Identity, NewAnswer, NewQuestion, QuestionId, VoteDirection};
use serde::Deserialize;
use serde_json::json;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<VoteLedger>,
    pub content: Arc<ContentService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/questions", get(list_questions).post(create_question))
        .route("/api/questions/{id}", get(question_detail))
        .route("/api/answers", post(create_answer))
        .route("/api/answers/{id}/vote", post(cast_vote))
        .with_state(state)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolves the caller's session, rejecting missing or stale tokens.
async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Identity, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthenticated)?;
    state
        .content
        .resolve_session(token)
        .await?
        .ok_or(ApiError::Unauthenticated)
}

/// Like [`authenticate`], but anonymous callers (and stale tokens) resolve
/// to `None` instead of an error.
async fn maybe_authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<Identity>, ApiError> {
    match bearer_token(headers) {
        Some(token) => Ok(state.content.resolve_session(token).await?),
        None => Ok(None),
    }
}

fn notification_label(status: NotificationStatus) -> &'static str {
    match status {
        NotificationStatus::Published => "published",
        NotificationStatus::Skipped(_) => "skipped",
        NotificationStatus::Failed => "failed",
    }
}

#[derive(Debug, Deserialize)]
struct VoteBody {
    /// Direction as a wire string so unknown values surface as a 400 with
    /// the validation message, not a body-rejection error.
    #[serde(rename = "type")]
    vote_type: String,
}

async fn cast_vote(
    State(state): State<AppState>,
    Path(answer_id): Path<AnswerId>,
    headers: HeaderMap,
    Json(body): Json<VoteBody>,
) -> Result<impl IntoResponse, ApiError> {
    let voter = authenticate(&state, &headers).await?;
    let direction: VoteDirection = body
        .vote_type
        .parse()
        .map_err(|e: forum_shared::types::InvalidDirection| ApiError::InvalidInput(e.to_string()))?;

    let receipt = state.ledger.cast_vote(&voter, answer_id, direction).await?;

    Ok(Json(json!({
        "success": true,
        "message": receipt.outcome.confirmation_message(),
        "outcome": receipt.outcome,
        "notification": notification_label(receipt.notification),
    })))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state.content.list_questions(params.page, params.limit).await?;
    Ok(Json(json!({
        "questions": page.questions,
        "pagination": page.pagination,
    })))
}

async fn create_question(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<NewQuestion>,
) -> Result<impl IntoResponse, ApiError> {
    let author = authenticate(&state, &headers).await?;
    let question = state.content.create_question(&author, body).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

async fn question_detail(
    State(state): State<AppState>,
    Path(question_id): Path<QuestionId>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let viewer = maybe_authenticate(&state, &headers).await?;
    let detail = state
        .content
        .question_detail(question_id, viewer.as_ref())
        .await?;
    Ok(Json(json!({
        "question": detail.question,
        "answers": detail.answers,
    })))
}

async fn create_answer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<NewAnswer>,
) -> Result<impl IntoResponse, ApiError> {
    let author = authenticate(&state, &headers).await?;
    let (record, notification) = state.content.create_answer(&author, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "answer": record,
            "notification": notification_label(notification),
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use forum_ledger::SkipReason;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc123"),
        );
        assert_eq!(bearer_token(&headers), Some("abc123"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("abc123"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_vote_body_accepts_the_wire_field_name() {
        let body: VoteBody = serde_json::from_str(r#"{"type": "up"}"#).unwrap();
        assert_eq!(body.vote_type, "up");
        // Unknown directions parse as a body but fail direction parsing.
        let body: VoteBody = serde_json::from_str(r#"{"type": "sideways"}"#).unwrap();
        assert!(body.vote_type.parse::<VoteDirection>().is_err());
    }

    #[test]
    fn test_notification_labels() {
        assert_eq!(notification_label(NotificationStatus::Published), "published");
        assert_eq!(
            notification_label(NotificationStatus::Skipped(SkipReason::SelfDirected)),
            "skipped"
        );
        assert_eq!(notification_label(NotificationStatus::Failed), "failed");
    }

    #[test]
    fn test_list_params_defaults() {
        let params: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
    }
}
