use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use docchat::application::ports::{OcrEngine, SessionRepository};
use docchat::application::services::{
    ConversationService, HistoryBudget, PromptComposer, RelevanceFilter,
};
use docchat::infrastructure::llm::OpenAiClient;
use docchat::infrastructure::observability::{TracingConfig, init_tracing};
use docchat::infrastructure::ocr::GoogleVisionClient;
use docchat::infrastructure::persistence::{InMemorySessionRepository, spawn_idle_sweeper};
use docchat::infrastructure::text_processing::ExtractorFactory;
use docchat::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;

    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.level.clone(),
        settings.logging.enable_json,
    ));

    let ocr: Arc<dyn OcrEngine> = Arc::new(GoogleVisionClient::new(
        &settings.ocr.endpoint,
        &settings.ocr.api_key,
        settings.ocr.timeout_secs.map(Duration::from_secs),
    ));
    let file_loader = Arc::new(ExtractorFactory::create(&settings.extraction, ocr));
    let llm_client = Arc::new(OpenAiClient::from_settings(&settings.llm));
    let session_store = Arc::new(InMemorySessionRepository::new());
    if let Some(idle_secs) = settings
        .conversation
        .session_idle_secs
        .filter(|secs| *secs > 0)
    {
        spawn_idle_sweeper(Arc::clone(&session_store), Duration::from_secs(idle_secs));
    }
    let sessions: Arc<dyn SessionRepository> = session_store;

    let conversation_service = Arc::new(ConversationService::new(
        file_loader,
        llm_client,
        sessions,
        PromptComposer::new(HistoryBudget::from_max_tokens(
            settings.conversation.max_prompt_tokens,
        )),
        RelevanceFilter::new(settings.conversation.relevance_filter),
    ));

    let state = AppState {
        conversation_service,
        max_upload_bytes: settings.extraction.max_file_size_bytes(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    tracing::info!(
        %addr,
        model = %settings.llm.chat_model,
        relevance_filter = settings.conversation.relevance_filter,
        "Listening"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
