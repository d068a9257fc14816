use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::ConversationError;
use crate::domain::ConversationHistory;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct RecordDto {
    pub question: String,
    pub answer: String,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub records: Vec<RecordDto>,
    pub transcript: String,
}

impl From<&ConversationHistory> for HistoryResponse {
    fn from(history: &ConversationHistory) -> Self {
        Self {
            records: history
                .all()
                .iter()
                .map(|r| RecordDto {
                    question: r.question().to_string(),
                    answer: r.answer().to_string(),
                })
                .collect(),
            transcript: history.transcript(),
        }
    }
}

pub fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

pub fn conversation_error_response(error: ConversationError) -> Response {
    let status = match &error {
        ConversationError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        ConversationError::NoDocument => StatusCode::CONFLICT,
        ConversationError::EmptyQuestion => StatusCode::BAD_REQUEST,
        ConversationError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!(error = %error, "Request failed");
    } else {
        tracing::warn!(error = %error, "Request rejected");
    }

    error_response(status, error.to_string())
}
