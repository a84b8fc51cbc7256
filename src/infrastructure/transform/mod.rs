mod engine_factory;
mod ghostscript_engine;
mod mock_engine;
mod pdfium_engine;
mod presets;

pub use engine_factory::TransformEngineFactory;
pub use ghostscript_engine::{GhostscriptEngine, WORKDIR_PREFIX};
pub use mock_engine::MockTransformEngine;
pub use pdfium_engine::PdfiumEngine;
pub use presets::{DEFAULT_BASE_DPI, GhostscriptPreset, MIN_DPI, raster_pixels, target_dpi};
