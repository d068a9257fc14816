use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::SessionId;
use crate::presentation::state::AppState;

use super::dto::{HistoryResponse, conversation_error_response};

#[derive(Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub has_document: bool,
    pub extracted_text: String,
    pub history: HistoryResponse,
}

#[tracing::instrument(skip(state))]
pub async fn create_session_handler<F, L>(State(state): State<AppState<F, L>>) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    match state.conversation_service.start_session().await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(CreateSessionResponse {
                session_id: id.to_string(),
            }),
        )
            .into_response(),
        Err(e) => conversation_error_response(e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_session_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    match state
        .conversation_service
        .session(SessionId::from_uuid(session_id))
        .await
    {
        Ok(session) => (
            StatusCode::OK,
            Json(SessionResponse {
                session_id: session.id.to_string(),
                has_document: session.document.is_some(),
                extracted_text: session.document_text().to_string(),
                history: HistoryResponse::from(&session.history),
            }),
        )
            .into_response(),
        Err(e) => conversation_error_response(e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn history_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    match state
        .conversation_service
        .session(SessionId::from_uuid(session_id))
        .await
    {
        Ok(session) => (
            StatusCode::OK,
            Json(HistoryResponse::from(&session.history)),
        )
            .into_response(),
        Err(e) => conversation_error_response(e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn end_session_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    match state
        .conversation_service
        .end_session(SessionId::from_uuid(session_id))
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => conversation_error_response(e),
    }
}
