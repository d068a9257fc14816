mod composite_file_loader;
mod extractor_factory;
mod image_ocr_adapter;
mod mock_file_loader;
mod pdf_ocr_adapter;
mod pdf_rasterizer;
mod plain_text_adapter;
mod spreadsheet_adapter;

pub use composite_file_loader::CompositeFileLoader;
pub use extractor_factory::ExtractorFactory;
pub use image_ocr_adapter::ImageOcrAdapter;
pub use mock_file_loader::MockFileLoader;
pub use pdf_ocr_adapter::{PdfOcrAdapter, format_pages, ocr_pages};
pub use pdf_rasterizer::RenderedPage;
pub use plain_text_adapter::PlainTextAdapter;
pub use spreadsheet_adapter::{SpreadsheetAdapter, render_table};
