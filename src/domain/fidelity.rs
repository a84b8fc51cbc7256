use std::fmt;

/// Target fidelity of a transform. Both components are fractions:
/// `quality` in `[0, 1]`, `scale` in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fidelity {
    quality: f32,
    scale: f32,
}

pub const DEFAULT_QUALITY_PERCENT: u8 = 50;
pub const DEFAULT_SCALE_PERCENT: u8 = 100;

impl Fidelity {
    pub fn new(quality: f32, scale: f32) -> Result<Self, FidelityError> {
        if !quality.is_finite() || !(0.0..=1.0).contains(&quality) {
            return Err(FidelityError::Quality(quality));
        }
        if !scale.is_finite() || scale <= 0.0 || scale > 1.0 {
            return Err(FidelityError::Scale(scale));
        }
        Ok(Self { quality, scale })
    }

    /// Builds a fidelity from the percent values accepted by the HTTP surface.
    pub fn from_percent(quality: u8, scale: u8) -> Result<Self, FidelityError> {
        if quality == 0 || quality > 100 {
            return Err(FidelityError::Quality(quality as f32 / 100.0));
        }
        if scale == 0 || scale > 100 {
            return Err(FidelityError::Scale(scale as f32 / 100.0));
        }
        Self::new(quality as f32 / 100.0, scale as f32 / 100.0)
    }

    pub fn quality(&self) -> f32 {
        self.quality
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Re-encoding quality on the 0-100 scale used by JPEG encoders.
    pub fn jpeg_quality(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

impl Default for Fidelity {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY_PERCENT as f32 / 100.0,
            scale: DEFAULT_SCALE_PERCENT as f32 / 100.0,
        }
    }
}

impl fmt::Display for Fidelity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quality={:.2} scale={:.2}", self.quality, self.scale)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FidelityError {
    #[error("quality out of range: {0}")]
    Quality(f32),
    #[error("scale out of range: {0}")]
    Scale(f32),
}
