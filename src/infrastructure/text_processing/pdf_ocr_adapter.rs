use std::io::Write;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError, OcrEngine};
use crate::domain::{ContentType, Document};

use super::pdf_rasterizer::{RenderedPage, rasterize_pages};

const RENDER_DPI: f32 = 300.0;

/// Joins page texts under `--- Page N ---` headers, one per page, in order.
pub fn format_pages(pages: &[String]) -> String {
    pages
        .iter()
        .enumerate()
        .map(|(index, text)| format!("--- Page {} ---\n{}\n\n", index + 1, text))
        .collect()
}

/// OCRs rendered pages in order and frames the results with page headers.
/// A page that failed to render, or that OCR rejects, keeps its header with an
/// empty body; the remaining pages are still processed.
pub async fn ocr_pages(ocr: &dyn OcrEngine, pages: Vec<RenderedPage>) -> String {
    let mut page_texts: Vec<String> = Vec::with_capacity(pages.len());
    for (index, page) in pages.into_iter().enumerate() {
        page_texts.push(page_text(ocr, index + 1, page).await);
    }
    format_pages(&page_texts)
}

async fn page_text(ocr: &dyn OcrEngine, page_number: usize, rendered: RenderedPage) -> String {
    let png_bytes = match rendered {
        Ok(bytes) => bytes,
        Err(reason) => {
            tracing::warn!(page_number, %reason, "Page could not be rendered");
            return String::new();
        }
    };

    match ocr.detect_text(&png_bytes).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(page_number, error = %e, "OCR failed for page");
            String::new()
        }
    }
}

/// Rasterizes each page and runs it through OCR. A page that fails keeps its
/// header with an empty body.
pub struct PdfOcrAdapter {
    ocr: Arc<dyn OcrEngine>,
    dpi: f32,
    pdfium_library_path: Option<String>,
}

impl PdfOcrAdapter {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self {
            ocr,
            dpi: RENDER_DPI,
            pdfium_library_path: None,
        }
    }

    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_pdfium_library_path(mut self, path: Option<String>) -> Self {
        self.pdfium_library_path = path;
        self
    }

    async fn rasterize(&self, data: &[u8]) -> Result<Vec<RenderedPage>, FileLoaderError> {
        let mut scratch = tempfile::Builder::new()
            .prefix("docchat-upload-")
            .suffix(".pdf")
            .tempfile()
            .map_err(|e| {
                FileLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
            })?;

        scratch.write_all(data).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let dpi = self.dpi;
        let library_path = self.pdfium_library_path.clone();

        // The scratch file moves into the task and is removed when it drops.
        tokio::task::spawn_blocking(move || {
            std::panic::catch_unwind(AssertUnwindSafe(|| {
                rasterize_pages(scratch.path(), dpi, library_path.as_deref())
            }))
            .unwrap_or_else(|_| {
                Err(FileLoaderError::ExtractionFailed(
                    "panic during PDF rasterization".to_string(),
                ))
            })
        })
        .await
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))?
    }
}

#[async_trait]
impl FileLoader for PdfOcrAdapter {
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
        if document.content_type != ContentType::Pdf {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let rendered = self.rasterize(data).await?;
        tracing::info!(
            page_count = rendered.len(),
            dpi = self.dpi,
            "PDF rasterization complete, starting OCR"
        );

        Ok(ocr_pages(self.ocr.as_ref(), rendered).await)
    }
}
