use docrelay::domain::Fidelity;
use docrelay::infrastructure::transform::{
    DEFAULT_BASE_DPI, GhostscriptPreset, MIN_DPI, raster_pixels, target_dpi,
};

#[test]
fn given_quality_boundaries_when_choosing_preset_then_upper_bounds_inclusive() {
    assert_eq!(GhostscriptPreset::for_quality(0.1), GhostscriptPreset::Screen);
    assert_eq!(GhostscriptPreset::for_quality(0.4), GhostscriptPreset::Screen);
    assert_eq!(GhostscriptPreset::for_quality(0.5), GhostscriptPreset::Ebook);
    assert_eq!(GhostscriptPreset::for_quality(0.7), GhostscriptPreset::Ebook);
    assert_eq!(GhostscriptPreset::for_quality(0.85), GhostscriptPreset::Printer);
    assert_eq!(GhostscriptPreset::for_quality(0.9), GhostscriptPreset::Prepress);
    assert_eq!(GhostscriptPreset::Printer.as_setting(), "/printer");
}

#[test]
fn given_scale_when_computing_dpi_then_rounded_and_floored() {
    let full = Fidelity::new(0.5, 1.0).unwrap();
    let half = Fidelity::new(0.5, 0.5).unwrap();
    let tiny = Fidelity::new(0.5, 0.1).unwrap();

    assert_eq!(target_dpi(DEFAULT_BASE_DPI, &full), 150);
    assert_eq!(target_dpi(DEFAULT_BASE_DPI, &half), 75);
    assert_eq!(target_dpi(DEFAULT_BASE_DPI, &tiny), MIN_DPI);
}

#[test]
fn given_letter_page_when_computing_raster_then_scaled_from_points() {
    let half = Fidelity::new(0.5, 0.5).unwrap();

    assert_eq!(raster_pixels(612.0, DEFAULT_BASE_DPI, &half), 638);
    assert_eq!(raster_pixels(0.1, DEFAULT_BASE_DPI, &half), 1);
}
