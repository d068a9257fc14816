use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{FileLoader, LlmClient};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    ask_handler, create_session_handler, end_session_handler, get_session_handler,
    health_handler, history_handler, shell_handler, text_document_handler,
    upload_document_handler,
};
use crate::presentation::state::AppState;

/// Room for multipart framing on top of the file itself.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router<F, L>(state: AppState<F, L>) -> Router
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes + MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(shell_handler))
        .route("/health", get(health_handler))
        .route("/api/v1/sessions", post(create_session_handler::<F, L>))
        .route(
            "/api/v1/sessions/{session_id}",
            get(get_session_handler::<F, L>).delete(end_session_handler::<F, L>),
        )
        .route(
            "/api/v1/sessions/{session_id}/document",
            put(upload_document_handler::<F, L>),
        )
        .route(
            "/api/v1/sessions/{session_id}/document/text",
            put(text_document_handler::<F, L>),
        )
        .route(
            "/api/v1/sessions/{session_id}/questions",
            post(ask_handler::<F, L>),
        )
        .route(
            "/api/v1/sessions/{session_id}/history",
            get(history_handler::<F, L>),
        )
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
