use std::path::Path;

use image::ImageFormat;
use pdfium_render::prelude::*;

use crate::application::ports::FileLoaderError;

/// PNG bytes of one page, or why that page could not be rendered.
pub type RenderedPage = Result<Vec<u8>, String>;

fn bind_pdfium(library_path: Option<&str>) -> Result<Pdfium, FileLoaderError> {
    let bindings = match library_path {
        Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)),
        None => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| FileLoaderError::ExtractionFailed(format!("pdfium bind failed: {e}")))?;

    Ok(Pdfium::new(bindings))
}

/// Renders every page at `dpi`. Only a document that cannot be opened fails
/// as a whole; a page that fails to render is reported in its slot.
pub(super) fn rasterize_pages(
    path: &Path,
    dpi: f32,
    library_path: Option<&str>,
) -> Result<Vec<RenderedPage>, FileLoaderError> {
    let pdfium = bind_pdfium(library_path)?;

    let doc = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("pdfium open failed: {e}")))?;

    let page_count = doc.pages().len() as usize;
    let mut rendered: Vec<RenderedPage> = Vec::with_capacity(page_count);

    for index in 0..page_count {
        rendered.push(render_page(&doc, index, dpi));
    }

    Ok(rendered)
}

fn render_page(doc: &PdfDocument<'_>, index: usize, dpi: f32) -> RenderedPage {
    let page = doc
        .pages()
        .get(index as u16)
        .map_err(|e| format!("page {index} access failed: {e}"))?;

    let width = (page.width().value * dpi / 72.0) as i32;
    let height = (page.height().value * dpi / 72.0) as i32;

    let bitmap = page
        .render_with_config(
            &PdfRenderConfig::new()
                .set_target_width(width)
                .set_target_height(height),
        )
        .map_err(|e| format!("render page {index} failed: {e}"))?;

    let mut png_bytes: Vec<u8> = Vec::new();
    bitmap
        .as_image()
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| format!("PNG encode page {index} failed: {e}"))?;

    Ok(png_bytes)
}
