use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;

use crate::infrastructure::ocr::DEFAULT_VISION_ENDPOINT;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub ocr: OcrSettings,
    pub extraction: ExtractionSettings,
    pub conversation: ConversationSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Any OpenAI-compatible chat-completion endpoint. The model is fixed here
/// and cannot be chosen per request.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: String,
    pub chat_model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<usize>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrSettings {
    pub endpoint: String,
    pub api_key: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub pdf_dpi: f32,
    pub max_file_size_mb: usize,
    /// Directory holding the pdfium shared library; system search path if unset.
    pub pdfium_library_path: Option<String>,
}

impl ExtractionSettings {
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationSettings {
    pub relevance_filter: bool,
    pub max_prompt_tokens: Option<usize>,
    /// Sessions untouched this long are ended. `0` keeps them until deleted.
    pub session_idle_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8501)?
            .set_default("llm.base_url", "https://api.groq.com/openai/v1")?
            .set_default("llm.chat_model", "llama-3.1-70b-versatile")?
            .set_default("ocr.endpoint", DEFAULT_VISION_ENDPOINT)?
            .set_default("extraction.pdf_dpi", 300.0)?
            .set_default("extraction.max_file_size_mb", 25)?
            .set_default("conversation.relevance_filter", false)?
            .set_default("conversation.session_idle_secs", 3600)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)
    }

    /// Defaults, then `appsettings.<environment>.toml` if present, then
    /// `APP__SECTION__KEY` environment variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let file_name = environment.settings_file();

        Self::with_defaults()?
            .add_source(File::with_name(&file_name).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Self::with_defaults()?
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
