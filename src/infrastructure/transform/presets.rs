use crate::domain::Fidelity;

pub const DEFAULT_BASE_DPI: f32 = 150.0;
pub const MIN_DPI: u32 = 36;
const POINTS_PER_INCH: f32 = 72.0;

/// Ghostscript `-dPDFSETTINGS` presets, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostscriptPreset {
    Screen,
    Ebook,
    Printer,
    Prepress,
}

impl GhostscriptPreset {
    pub fn for_quality(quality: f32) -> Self {
        if quality <= 0.4 {
            Self::Screen
        } else if quality <= 0.7 {
            Self::Ebook
        } else if quality <= 0.85 {
            Self::Printer
        } else {
            Self::Prepress
        }
    }

    pub fn as_setting(&self) -> &'static str {
        match self {
            Self::Screen => "/screen",
            Self::Ebook => "/ebook",
            Self::Printer => "/printer",
            Self::Prepress => "/prepress",
        }
    }
}

/// Image resolution for a scale factor, never below [`MIN_DPI`].
pub fn target_dpi(base_dpi: f32, fidelity: &Fidelity) -> u32 {
    ((base_dpi * fidelity.scale()).round() as u32).max(MIN_DPI)
}

/// Raster size in pixels for a page dimension given in points.
pub fn raster_pixels(points: f32, base_dpi: f32, fidelity: &Fidelity) -> i32 {
    ((points / POINTS_PER_INCH * base_dpi * fidelity.scale()).round() as i32).max(1)
}
