use std::sync::{Arc, Mutex};
use std::time::Duration;

use docchat::application::ports::{LlmClient, LlmClientError, SessionRepository};
use docchat::application::services::{
    ConversationError, ConversationService, HistoryBudget, IRRELEVANT_QUESTION_ANSWER,
    PromptComposer, RelevanceFilter,
};
use docchat::domain::{ContentType, Document, SessionId};
use docchat::infrastructure::persistence::InMemorySessionRepository;
use docchat::infrastructure::text_processing::MockFileLoader;

use crate::support::{FailingLlmClient, RecordingLlmClient};

/// Takes a while to answer, so overlapping questions would see stale history.
struct SlowLlmClient {
    prompts: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl LlmClient for SlowLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        tokio::time::sleep(Duration::from_millis(30)).await;
        Ok("done".to_string())
    }
}

fn service_with<L: LlmClient>(
    loader: MockFileLoader,
    llm_client: Arc<L>,
    relevance_filter: bool,
) -> ConversationService<MockFileLoader, L> {
    let sessions: Arc<dyn SessionRepository> = Arc::new(InMemorySessionRepository::new());
    ConversationService::new(
        Arc::new(loader),
        llm_client,
        sessions,
        PromptComposer::new(HistoryBudget::Unbounded),
        RelevanceFilter::new(relevance_filter),
    )
}

#[tokio::test]
async fn given_k_exchanges_when_reading_session_then_history_has_k_records_in_order() {
    let llm = RecordingLlmClient::new("an answer");
    let service = service_with(MockFileLoader::Utf8, Arc::clone(&llm), false);
    let id = service.start_session().await.unwrap();
    service.load_text(id, "The sky is blue.").await.unwrap();

    let questions = ["What color?", "Why blue?", "Always?"];
    for question in questions {
        let outcome = service.ask(id, question).await.unwrap();
        assert_eq!(outcome.answer, "an answer");
        assert!(outcome.notice.is_none());
    }

    let session = service.session(id).await.unwrap();
    assert_eq!(session.history.len(), 3);
    for (record, question) in session.history.all().iter().zip(questions) {
        assert_eq!(record.question(), question);
        assert_eq!(record.answer(), "an answer");
    }
}

#[tokio::test]
async fn given_two_questions_when_asking_second_then_prompt_includes_first_exchange() {
    let llm = RecordingLlmClient::new("Blue.");
    let service = service_with(MockFileLoader::Utf8, Arc::clone(&llm), false);
    let id = service.start_session().await.unwrap();
    service.load_text(id, "The sky is blue.").await.unwrap();

    service.ask(id, "What color is the sky?").await.unwrap();
    service.ask(id, "Are you sure?").await.unwrap();

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(!prompts[0].contains("Previous conversation:"));
    assert!(prompts[1].contains(
        "Previous conversation:\nQ: What color is the sky?\nA: Blue.\n\nQuestion: Are you sure?\nAnswer:"
    ));
}

#[tokio::test]
async fn given_model_failure_when_asking_then_returns_empty_answer_and_keeps_history() {
    let service = service_with(MockFileLoader::Utf8, Arc::new(FailingLlmClient), false);
    let id = service.start_session().await.unwrap();
    service.load_text(id, "The sky is blue.").await.unwrap();

    let outcome = service.ask(id, "What color?").await.unwrap();

    assert_eq!(outcome.answer, "");
    assert!(outcome.notice.unwrap().contains("connection reset"));
    assert!(service.session(id).await.unwrap().history.is_empty());
}

#[tokio::test]
async fn given_no_document_when_asking_then_returns_no_document() {
    let service = service_with(MockFileLoader::Utf8, RecordingLlmClient::new("x"), false);
    let id = service.start_session().await.unwrap();

    let result = service.ask(id, "Anything?").await;

    assert!(matches!(result, Err(ConversationError::NoDocument)));
}

#[tokio::test]
async fn given_failed_extraction_when_asking_then_returns_no_document() {
    let service = service_with(
        MockFileLoader::Failing("unreadable".to_string()),
        RecordingLlmClient::new("x"),
        false,
    );
    let id = service.start_session().await.unwrap();
    let document = Document::new("scan.png".to_string(), ContentType::Png, 4);

    let extraction = service.load_upload(id, b"data", &document).await.unwrap();
    let result = service.ask(id, "Anything?").await;

    assert_eq!(extraction.text, "");
    assert!(extraction.notice.is_some());
    assert!(matches!(result, Err(ConversationError::NoDocument)));
}

#[tokio::test]
async fn given_blank_question_when_asking_then_returns_empty_question() {
    let service = service_with(MockFileLoader::Utf8, RecordingLlmClient::new("x"), false);
    let id = service.start_session().await.unwrap();
    service.load_text(id, "content").await.unwrap();

    let result = service.ask(id, "   \n").await;

    assert!(matches!(result, Err(ConversationError::EmptyQuestion)));
}

#[tokio::test]
async fn given_unknown_session_when_loading_text_then_returns_session_not_found() {
    let service = service_with(MockFileLoader::Utf8, RecordingLlmClient::new("x"), false);

    let result = service.load_text(SessionId::new(), "content").await;

    assert!(matches!(result, Err(ConversationError::SessionNotFound(_))));
}

#[tokio::test]
async fn given_new_input_when_loading_then_replaces_document_and_keeps_history() {
    let llm = RecordingLlmClient::new("ok");
    let service = service_with(MockFileLoader::Utf8, Arc::clone(&llm), false);
    let id = service.start_session().await.unwrap();
    service.load_text(id, "first document").await.unwrap();
    service.ask(id, "q1").await.unwrap();

    service.load_text(id, "second document").await.unwrap();
    service.ask(id, "q2").await.unwrap();

    let session = service.session(id).await.unwrap();
    assert_eq!(session.document_text(), "second document");
    assert_eq!(session.history.len(), 2);
    let last_prompt = llm.prompts().pop().unwrap();
    assert!(last_prompt.contains("second document"));
    assert!(!last_prompt.contains("first document"));
    assert!(last_prompt.contains("Q: q1\nA: ok"));
}

#[tokio::test]
async fn given_relevance_filter_when_question_unrelated_then_skips_model_and_history() {
    let llm = RecordingLlmClient::new("ok");
    let service = service_with(MockFileLoader::Utf8, Arc::clone(&llm), true);
    let id = service.start_session().await.unwrap();
    service.load_text(id, "Quarterly revenue grew 4%").await.unwrap();

    let outcome = service.ask(id, "Who won yesterday?").await.unwrap();

    assert_eq!(outcome.answer, IRRELEVANT_QUESTION_ANSWER);
    assert!(outcome.notice.is_some());
    assert!(llm.prompts().is_empty());
    assert!(outcome.history.is_empty());
}

#[tokio::test]
async fn given_concurrent_questions_when_asking_then_second_prompt_sees_first_exchange() {
    let llm = Arc::new(SlowLlmClient {
        prompts: Mutex::new(Vec::new()),
    });
    let service = service_with(MockFileLoader::Utf8, Arc::clone(&llm), false);
    let id = service.start_session().await.unwrap();
    service.load_text(id, "The sky is blue.").await.unwrap();

    let (first, second) = tokio::join!(service.ask(id, "q1"), service.ask(id, "q2"));
    first.unwrap();
    second.unwrap();

    let prompts = llm.prompts.lock().unwrap().clone();
    assert_eq!(prompts.len(), 2);
    assert!(!prompts[0].contains("Previous conversation:"));
    assert!(prompts[1].contains("Previous conversation:"));
    assert_eq!(service.session(id).await.unwrap().history.len(), 2);
}

#[tokio::test]
async fn given_ended_session_when_reading_then_returns_session_not_found() {
    let service = service_with(MockFileLoader::Utf8, RecordingLlmClient::new("x"), false);
    let id = service.start_session().await.unwrap();
    service.load_text(id, "content").await.unwrap();

    service.end_session(id).await.unwrap();

    assert!(matches!(
        service.session(id).await,
        Err(ConversationError::SessionNotFound(_))
    ));
    assert!(matches!(
        service.end_session(id).await,
        Err(ConversationError::SessionNotFound(_))
    ));
}
