use std::sync::Arc;

use crate::application::ports::TransformEngine;
use crate::presentation::config::{EngineKind, TransformSettings};

use super::ghostscript_engine::GhostscriptEngine;
use super::mock_engine::MockTransformEngine;
use super::pdfium_engine::PdfiumEngine;

pub struct TransformEngineFactory;

impl TransformEngineFactory {
    pub fn create(settings: &TransformSettings) -> Arc<dyn TransformEngine> {
        tracing::info!(engine = ?settings.engine, base_dpi = settings.base_dpi, "Transform engine selected");
        match settings.engine {
            EngineKind::Ghostscript => {
                let engine =
                    GhostscriptEngine::new(settings.ghostscript_binary.clone(), settings.base_dpi);
                match &settings.temp_dir {
                    Some(root) => Arc::new(engine.with_temp_root(root)),
                    None => Arc::new(engine),
                }
            }
            EngineKind::Pdfium => Arc::new(PdfiumEngine::new(
                settings.pdfium_library_path.clone(),
                settings.base_dpi,
            )),
            EngineKind::Mock => Arc::new(MockTransformEngine::default()),
        }
    }
}
