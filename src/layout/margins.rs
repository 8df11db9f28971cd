//! Page margin configuration

use crate::error::{PageError, Result};
use crate::layout::units::PixelRatio;
use serde::{Deserialize, Serialize};

/// Default margin on every side: one inch
pub const DEFAULT_MARGIN_MM: f64 = 25.4;

/// Four-sided page margins in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginConfig {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self::all(DEFAULT_MARGIN_MM)
    }
}

impl MarginConfig {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn all(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Margins must be finite and non-negative
    pub fn validate(&self) -> Result<()> {
        let sides = [self.top, self.right, self.bottom, self.left];
        if sides.iter().all(|v| v.is_finite() && *v >= 0.0) {
            Ok(())
        } else {
            Err(PageError::InvalidMargins(format!("{:?}", self)))
        }
    }

    /// Strict parse of the persisted JSON form
    pub fn from_json(text: &str) -> Result<Self> {
        let margins: MarginConfig = serde_json::from_str(text)?;
        margins.validate()?;
        Ok(margins)
    }

    /// Parse the persisted form, falling back to the default configuration
    pub fn parse_or_default(text: &str) -> Self {
        Self::from_json(text).unwrap_or_default()
    }

    /// Persisted JSON form
    pub fn to_json(&self) -> String {
        // Four plain f64 fields always serialize; NaN/inf become `null` and
        // fall back to defaults when read.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Margins converted to device pixels
    pub fn to_pixels(&self, ratio: PixelRatio) -> MarginConfig {
        MarginConfig {
            top: ratio.mm_to_px(self.top),
            right: ratio.mm_to_px(self.right),
            bottom: ratio.mm_to_px(self.bottom),
            left: ratio.mm_to_px(self.left),
        }
    }
}
