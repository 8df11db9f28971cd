//! Unit conversion between millimetres, pixels and CSS lengths

/// Millimetres per inch
const MM_PER_INCH: f64 = 25.4;

/// CSS reference resolution
const CSS_DPI: f64 = 96.0;

/// Millimetre to device pixel ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRatio(pub f64);

impl Default for PixelRatio {
    fn default() -> Self {
        Self(CSS_DPI / MM_PER_INCH)
    }
}

impl PixelRatio {
    /// Ratio for a given dots-per-inch resolution
    pub fn from_dpi(dpi: f64) -> Self {
        Self(dpi / MM_PER_INCH)
    }

    pub fn mm_to_px(&self, mm: f64) -> f64 {
        mm * self.0
    }

    pub fn px_to_mm(&self, px: f64) -> f64 {
        if self.0 == 0.0 {
            return 0.0;
        }
        px / self.0
    }
}

/// Format millimetres as a CSS length, trimming trailing zeros
pub fn mm_to_css(mm: f64) -> String {
    let rounded = (mm * 1000.0).round() / 1000.0;
    format!("{}mm", rounded)
}
