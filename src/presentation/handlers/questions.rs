use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::SessionId;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::dto::{HistoryResponse, conversation_error_response};

#[derive(Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct AnswerResponse {
    pub answer: String,
    pub notice: Option<String>,
    pub history: HistoryResponse,
}

#[tracing::instrument(skip(state, request))]
pub async fn ask_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<QuestionRequest>,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    tracing::debug!(question = %sanitize_prompt(&request.question), "Processing question");

    match state
        .conversation_service
        .ask(SessionId::from_uuid(session_id), &request.question)
        .await
    {
        Ok(outcome) => (
            StatusCode::OK,
            Json(AnswerResponse {
                answer: outcome.answer,
                notice: outcome.notice,
                history: HistoryResponse::from(&outcome.history),
            }),
        )
            .into_response(),
        Err(e) => conversation_error_response(e),
    }
}
