use async_trait::async_trait;

/// Converts the pixels of one image into text.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Returns the full-page transcription, or an empty string when the image
    /// contains no detectable text.
    async fn detect_text(&self, image: &[u8]) -> Result<String, OcrError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("service reported error: {0}")]
    ServiceError(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
