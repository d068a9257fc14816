use std::sync::Arc;

use crate::application::ports::FileLoader;
use crate::domain::Document;

/// Result of turning one input into text. A failure leaves `text` empty and
/// explains itself in `notice`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub notice: Option<String>,
}

impl Extraction {
    pub fn failed(notice: String) -> Self {
        Self {
            text: String::new(),
            notice: Some(notice),
        }
    }
}

pub struct ExtractionService<F>
where
    F: FileLoader,
{
    file_loader: Arc<F>,
}

impl<F> ExtractionService<F>
where
    F: FileLoader,
{
    pub fn new(file_loader: Arc<F>) -> Self {
        Self { file_loader }
    }

    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
            input = %document.content_type.input_kind()
        )
    )]
    pub async fn extract(&self, data: &[u8], document: &Document) -> Extraction {
        match self.file_loader.extract_text(data, document).await {
            Ok(text) => {
                tracing::info!(chars = text.chars().count(), "Extraction complete");
                Extraction { text, notice: None }
            }
            Err(e) => {
                tracing::error!(error = %e, "Extraction failed");
                Extraction::failed(format!(
                    "Error extracting text from {}: {e}",
                    document.content_type.input_kind()
                ))
            }
        }
    }

    /// Direct text entry. The content comes back unchanged.
    pub async fn extract_typed(&self, content: &str) -> Extraction {
        let document = Document::typed_text(content.len() as u64);
        self.extract(content.as_bytes(), &document).await
    }
}
