use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use pdfium_render::prelude::*;

use crate::application::ports::{ProgressSink, TransformEngine, TransformError};
use crate::domain::Fidelity;

use super::presets::raster_pixels;

/// Renders every page to a JPEG raster and rebuilds the document from those
/// rasters, one page at a time. Page geometry is kept; text and vector
/// content become part of the image.
pub struct PdfiumEngine {
    library_path: Option<String>,
    base_dpi: f32,
}

impl PdfiumEngine {
    /// `library_path` points at a directory holding the pdfium shared
    /// library; `None` binds to the system library.
    pub fn new(library_path: Option<String>, base_dpi: f32) -> Self {
        Self {
            library_path,
            base_dpi,
        }
    }
}

#[async_trait]
impl TransformEngine for PdfiumEngine {
    #[tracing::instrument(skip(self, data, fidelity, progress), fields(bytes = data.len(), %fidelity))]
    async fn transform(
        &self,
        data: Vec<u8>,
        fidelity: Fidelity,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Vec<u8>, TransformError> {
        if data.is_empty() {
            return Err(TransformError::InvalidInput("document is empty".into()));
        }

        let library_path = self.library_path.clone();
        let base_dpi = self.base_dpi;
        let span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            let pdfium = bind(library_path.as_deref())?;
            rerender(&pdfium, &data, fidelity, base_dpi, progress.as_ref())
        })
        .await
        .map_err(|e| TransformError::ToolFailed(format!("render task failed: {e}")))?
    }
}

fn bind(library_path: Option<&str>) -> Result<Pdfium, TransformError> {
    let bindings = match library_path {
        Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)),
        None => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| TransformError::ToolFailed(format!("pdfium bind failed: {e}")))?;
    Ok(Pdfium::new(bindings))
}

fn rerender(
    pdfium: &Pdfium,
    data: &[u8],
    fidelity: Fidelity,
    base_dpi: f32,
    progress: &dyn ProgressSink,
) -> Result<Vec<u8>, TransformError> {
    let source = pdfium
        .load_pdf_from_byte_slice(data, None)
        .map_err(|e| TransformError::InvalidInput(format!("pdfium open failed: {e}")))?;
    let mut output = pdfium
        .create_new_pdf()
        .map_err(|e| TransformError::ToolFailed(format!("create document failed: {e}")))?;

    let total = source.pages().len();
    if total == 0 {
        return Err(TransformError::InvalidInput("document has no pages".into()));
    }

    for index in 0..total {
        let page = source.pages().get(index).map_err(|e| {
            TransformError::InvalidInput(format!("page {index} access failed: {e}"))
        })?;
        let width = page.width();
        let height = page.height();

        let jpeg = render_page_jpeg(&page, width, height, base_dpi, &fidelity)
            .map_err(|e| TransformError::ToolFailed(format!("page {index}: {e}")))?;
        drop(page);

        append_image_page(&mut output, width, height, jpeg)
            .map_err(|e| TransformError::ToolFailed(format!("page {index} rebuild failed: {e}")))?;

        progress.report(index as u32 + 1, total as u32);
    }

    let bytes = output
        .save_to_bytes()
        .map_err(|e| TransformError::ToolFailed(format!("save failed: {e}")))?;
    tracing::debug!(pages = total as u32, output_bytes = bytes.len(), "Pdfium transform finished");
    Ok(bytes)
}

fn render_page_jpeg(
    page: &PdfPage,
    width: PdfPoints,
    height: PdfPoints,
    base_dpi: f32,
    fidelity: &Fidelity,
) -> Result<Vec<u8>, String> {
    let bitmap = page
        .render_with_config(
            &PdfRenderConfig::new()
                .set_target_width(raster_pixels(width.value, base_dpi, fidelity))
                .set_target_height(raster_pixels(height.value, base_dpi, fidelity)),
        )
        .map_err(|e| format!("render failed: {e}"))?;

    let raster = DynamicImage::ImageRgb8(bitmap.as_image().to_rgb8());
    drop(bitmap);

    let mut jpeg = Vec::new();
    raster
        .write_with_encoder(JpegEncoder::new_with_quality(
            &mut Cursor::new(&mut jpeg),
            fidelity.jpeg_quality(),
        ))
        .map_err(|e| format!("jpeg encode failed: {e}"))?;
    Ok(jpeg)
}

fn append_image_page(
    output: &mut PdfDocument,
    width: PdfPoints,
    height: PdfPoints,
    jpeg: Vec<u8>,
) -> Result<(), PdfiumError> {
    let mut image = PdfPageImageObject::new_from_jpeg_reader(output, Cursor::new(jpeg))?;
    image.scale(width.value, height.value)?;

    let mut page = output
        .pages_mut()
        .create_page_at_end(PdfPagePaperSize::Custom(width, height))?;
    page.objects_mut().add_image_object(image)?;
    Ok(())
}
