use std::sync::Arc;

use crate::application::ports::{FileLoader, OcrEngine};
use crate::domain::ContentType;
use crate::presentation::config::ExtractionSettings;

use super::composite_file_loader::CompositeFileLoader;
use super::image_ocr_adapter::ImageOcrAdapter;
use super::pdf_ocr_adapter::PdfOcrAdapter;
use super::plain_text_adapter::PlainTextAdapter;
use super::spreadsheet_adapter::SpreadsheetAdapter;

pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Registers one adapter per accepted content type. Images and PDFs share
    /// the same OCR engine.
    pub fn create(settings: &ExtractionSettings, ocr: Arc<dyn OcrEngine>) -> CompositeFileLoader {
        let image: Arc<dyn FileLoader> = Arc::new(ImageOcrAdapter::new(Arc::clone(&ocr)));
        let pdf: Arc<dyn FileLoader> = Arc::new(
            PdfOcrAdapter::new(ocr)
                .with_dpi(settings.pdf_dpi)
                .with_pdfium_library_path(settings.pdfium_library_path.clone()),
        );
        let spreadsheet: Arc<dyn FileLoader> = Arc::new(SpreadsheetAdapter);
        let text: Arc<dyn FileLoader> = Arc::new(PlainTextAdapter);

        tracing::info!(pdf_dpi = settings.pdf_dpi, "Document extractors registered");

        CompositeFileLoader::new(vec![
            (ContentType::Text, text),
            (ContentType::Png, Arc::clone(&image)),
            (ContentType::Jpeg, image),
            (ContentType::Pdf, pdf),
            (ContentType::Xlsx, Arc::clone(&spreadsheet)),
            (ContentType::Csv, spreadsheet),
        ])
    }
}
