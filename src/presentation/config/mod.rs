mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ConversationSettings, ExtractionSettings, LlmSettings, LoggingSettings, OcrSettings,
    ServerSettings, Settings,
};
