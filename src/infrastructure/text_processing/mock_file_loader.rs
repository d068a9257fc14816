use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::Document;

/// Treats every input as UTF-8 text, or fails every time.
pub enum MockFileLoader {
    Utf8,
    Failing(String),
}

#[async_trait::async_trait]
impl FileLoader for MockFileLoader {
    async fn extract_text(&self, data: &[u8], _doc: &Document) -> Result<String, FileLoaderError> {
        match self {
            Self::Utf8 => String::from_utf8(data.to_vec())
                .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string())),
            Self::Failing(reason) => Err(FileLoaderError::ExtractionFailed(reason.clone())),
        }
    }
}
