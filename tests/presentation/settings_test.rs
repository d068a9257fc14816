use docchat::presentation::Settings;

const MINIMAL: &str = r#"
[llm]
api_key = "groq-key"

[ocr]
api_key = "vision-key"
"#;

#[test]
fn given_only_keys_when_loading_then_defaults_fill_the_rest() {
    let settings = Settings::from_toml(MINIMAL).unwrap();

    assert_eq!(settings.server.port, 8501);
    assert_eq!(settings.llm.chat_model, "llama-3.1-70b-versatile");
    assert_eq!(settings.llm.base_url, "https://api.groq.com/openai/v1");
    assert_eq!(settings.llm.temperature, None);
    assert_eq!(settings.ocr.endpoint, "https://vision.googleapis.com");
    assert_eq!(settings.extraction.pdf_dpi, 300.0);
    assert_eq!(settings.extraction.max_file_size_bytes(), 25 * 1024 * 1024);
    assert!(!settings.conversation.relevance_filter);
    assert_eq!(settings.conversation.max_prompt_tokens, None);
    assert_eq!(settings.conversation.session_idle_secs, Some(3600));
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn given_overrides_when_loading_then_they_win() {
    let toml = r#"
[server]
port = 9000

[llm]
api_key = "k"
chat_model = "other-model"
temperature = 0.2
timeout_secs = 30

[ocr]
api_key = "v"

[conversation]
relevance_filter = true
max_prompt_tokens = 4096
"#;

    let settings = Settings::from_toml(toml).unwrap();

    assert_eq!(settings.server.port, 9000);
    assert_eq!(settings.llm.chat_model, "other-model");
    assert_eq!(settings.llm.temperature, Some(0.2));
    assert_eq!(settings.llm.timeout_secs, Some(30));
    assert!(settings.conversation.relevance_filter);
    assert_eq!(settings.conversation.max_prompt_tokens, Some(4096));
}

#[test]
fn given_missing_llm_key_when_loading_then_fails() {
    let toml = r#"
[ocr]
api_key = "v"
"#;

    assert!(Settings::from_toml(toml).is_err());
}
