use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::Extraction;
use crate::domain::{ContentType, Document, InputKind, SessionId};
use crate::presentation::state::AppState;

use super::dto::{conversation_error_response, error_response};

#[derive(Deserialize)]
pub struct TextDocumentRequest {
    pub content: String,
}

#[derive(Serialize)]
pub struct ExtractionResponse {
    pub input_type: String,
    pub extracted_text: String,
    pub notice: Option<String>,
}

impl ExtractionResponse {
    fn new(input_kind: InputKind, extraction: Extraction) -> Self {
        Self {
            input_type: input_kind.to_string(),
            extracted_text: extraction.text,
            notice: extraction.notice,
        }
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn text_document_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<TextDocumentRequest>,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    match state
        .conversation_service
        .load_text(SessionId::from_uuid(session_id), &request.content)
        .await
    {
        Ok(extraction) => (
            StatusCode::OK,
            Json(ExtractionResponse::new(InputKind::Text, extraction)),
        )
            .into_response(),
        Err(e) => conversation_error_response(e),
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_document_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Upload request with no file");
            return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
        }
        Err(e) => return multipart_error_response(e),
    };

    let filename = field.file_name().unwrap_or("unknown").to_string();

    let Some(content_type) = ContentType::from_filename(&filename) else {
        tracing::warn!(filename = %filename, "Unsupported file type");
        return error_response(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            format!("Unsupported file type: {filename}. Accepted: png, jpg, jpeg, pdf, xlsx, csv"),
        );
    };

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => return multipart_error_response(e),
    };

    if data.len() > state.max_upload_bytes {
        tracing::warn!(bytes = data.len(), limit = state.max_upload_bytes, "Upload too large");
        return error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("File exceeds {} bytes", state.max_upload_bytes),
        );
    }

    tracing::debug!(filename = %filename, bytes = data.len(), "File data received");

    let document = Document::new(filename, content_type, data.len() as u64);

    match state
        .conversation_service
        .load_upload(SessionId::from_uuid(session_id), &data, &document)
        .await
    {
        Ok(extraction) => (
            StatusCode::OK,
            Json(ExtractionResponse::new(
                content_type.input_kind(),
                extraction,
            )),
        )
            .into_response(),
        Err(e) => conversation_error_response(e),
    }
}

/// Keeps the status axum assigns, so a body cut off by the upload limit
/// surfaces as 413 rather than a generic bad request.
fn multipart_error_response(error: MultipartError) -> Response {
    let status = error.status();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!(error = %error, "Upload exceeded body limit");
        return error_response(status, "File exceeds the upload limit");
    }

    tracing::error!(error = %error, "Failed to read multipart");
    error_response(status, format!("Failed to read upload: {}", error.body_text()))
}
