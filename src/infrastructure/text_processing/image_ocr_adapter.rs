use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError, OcrEngine};
use crate::domain::{Document, InputKind};

pub struct ImageOcrAdapter {
    ocr: Arc<dyn OcrEngine>,
}

impl ImageOcrAdapter {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self { ocr }
    }
}

#[async_trait]
impl FileLoader for ImageOcrAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type.input_kind() != InputKind::Image {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let format = image::guess_format(data)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("unreadable image: {e}")))?;
        tracing::debug!(?format, bytes = data.len(), "Sending image to OCR");

        Ok(self.ocr.detect_text(data).await?)
    }
}
