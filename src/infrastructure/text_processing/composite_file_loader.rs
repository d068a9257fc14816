use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

/// Routes each input to the extractor registered for its content type.
pub struct CompositeFileLoader {
    extractors: HashMap<ContentType, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(extractors: Vec<(ContentType, Arc<dyn FileLoader>)>) -> Self {
        Self {
            extractors: extractors.into_iter().collect(),
        }
    }

    pub fn supports(&self, content_type: ContentType) -> bool {
        self.extractors.contains_key(&content_type)
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        let Some(extractor) = self.extractors.get(&document.content_type) else {
            tracing::warn!(
                content_type = document.content_type.as_mime(),
                "No extractor registered"
            );
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        };

        tracing::debug!(
            input = %document.content_type.input_kind(),
            bytes = data.len(),
            "Dispatching extraction"
        );
        extractor.extract_text(data, document).await
    }
}
