use crate::application::ports::{OcrEngine, OcrError};

/// Returns the same transcription for every image.
pub struct MockOcrEngine {
    text: String,
}

impl MockOcrEngine {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait::async_trait]
impl OcrEngine for MockOcrEngine {
    async fn detect_text(&self, _image: &[u8]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}
