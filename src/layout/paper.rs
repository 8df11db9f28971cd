//! Paper size table and orientation

use crate::error::PageError;
use crate::layout::units::{mm_to_css, PixelRatio};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical paper dimensions in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaperDimensions {
    pub width: f64,
    pub height: f64,
}

impl PaperDimensions {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Swap width and height for landscape, identity for portrait
    pub fn apply_orientation(self, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Portrait => self,
            Orientation::Landscape => Self {
                width: self.height,
                height: self.width,
            },
        }
    }

    /// Convert to device pixels using the given ratio
    pub fn to_pixels(self, ratio: PixelRatio) -> PixelDimensions {
        PixelDimensions {
            width: ratio.mm_to_px(self.width),
            height: ratio.mm_to_px(self.height),
        }
    }

    /// CSS lengths as `(width, height)`
    pub fn to_css(self) -> (String, String) {
        (mm_to_css(self.width), mm_to_css(self.height))
    }
}

/// Paper dimensions in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelDimensions {
    pub width: f64,
    pub height: f64,
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => Err(PageError::InvalidOrientation(s.to_string())),
        }
    }
}

macro_rules! paper_sizes {
    ($($variant:ident => $name:literal, $width:expr, $height:expr;)+) => {
        /// Known paper size identifiers
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum PaperSize {
            $(
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl PaperSize {
            /// Every size in table order
            pub const ALL: &'static [PaperSize] = &[$(PaperSize::$variant),+];

            /// Identifier as persisted on page nodes
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(PaperSize::$variant => $name,)+
                }
            }

            /// Portrait dimensions in millimetres
            pub fn dimensions(&self) -> PaperDimensions {
                match self {
                    $(PaperSize::$variant => PaperDimensions::new($width, $height),)+
                }
            }

            fn lookup(id: &str) -> Option<Self> {
                match id {
                    $($name => Some(PaperSize::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

paper_sizes! {
    A0 => "A0", 841.0, 1189.0;
    A1 => "A1", 594.0, 841.0;
    A2 => "A2", 420.0, 594.0;
    A3 => "A3", 297.0, 420.0;
    A4 => "A4", 210.0, 297.0;
    A5 => "A5", 148.0, 210.0;
    A6 => "A6", 105.0, 148.0;
    A7 => "A7", 74.0, 105.0;
    A8 => "A8", 52.0, 74.0;
    A9 => "A9", 37.0, 52.0;
    A10 => "A10", 26.0, 37.0;
    B0 => "B0", 1000.0, 1414.0;
    B1 => "B1", 707.0, 1000.0;
    B2 => "B2", 500.0, 707.0;
    B3 => "B3", 353.0, 500.0;
    B4 => "B4", 250.0, 353.0;
    B5 => "B5", 176.0, 250.0;
    B6 => "B6", 125.0, 176.0;
    B7 => "B7", 88.0, 125.0;
    B8 => "B8", 62.0, 88.0;
    B9 => "B9", 44.0, 62.0;
    B10 => "B10", 31.0, 44.0;
    Letter => "Letter", 215.9, 279.4;
    Legal => "Legal", 215.9, 355.6;
    Tabloid => "Tabloid", 279.4, 431.8;
    Ledger => "Ledger", 431.8, 279.4;
    Executive => "Executive", 184.15, 266.7;
    HalfLetter => "Half Letter", 139.7, 215.9;
    JuniorLegal => "Junior Legal", 127.0, 203.2;
}

/// Paper size used whenever none is configured or an identifier is unknown
pub const DEFAULT_PAPER_SIZE: PaperSize = PaperSize::A4;

impl Default for PaperSize {
    fn default() -> Self {
        DEFAULT_PAPER_SIZE
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaperSize {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaperSize::lookup(s).ok_or_else(|| PageError::InvalidPaperSize(s.to_string()))
    }
}

/// Whether `id` names an entry in the paper size table
pub fn is_valid_paper_size(id: &str) -> bool {
    PaperSize::lookup(id).is_some()
}

/// Parse an identifier, normalizing unknown values to the default size
pub fn normalize_paper_size(id: &str) -> PaperSize {
    PaperSize::lookup(id).unwrap_or(DEFAULT_PAPER_SIZE)
}

/// Dimensions for `id`, or for the default size when `id` is unknown
pub fn dimensions_for(id: &str) -> PaperDimensions {
    normalize_paper_size(id).dimensions()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sizes_are_valid() {
        for size in PaperSize::ALL {
            assert!(is_valid_paper_size(size.as_str()));
            assert_eq!(size.as_str().parse::<PaperSize>().unwrap(), *size);
            assert_eq!(dimensions_for(size.as_str()), size.dimensions());
        }
    }

    #[test]
    fn test_invalid_size_uses_default_dimensions() {
        assert!(!is_valid_paper_size("A11"));
        assert!(!is_valid_paper_size("a4"));
        assert!(!is_valid_paper_size(""));
        assert_eq!(dimensions_for("A11"), DEFAULT_PAPER_SIZE.dimensions());
        assert_eq!(dimensions_for(""), PaperDimensions::new(210.0, 297.0));
    }

    #[test]
    fn test_orientation_swap() {
        let a4 = PaperSize::A4.dimensions();
        let landscape = a4.apply_orientation(Orientation::Landscape);
        assert_eq!(landscape, PaperDimensions::new(297.0, 210.0));
        assert_eq!(a4.apply_orientation(Orientation::Portrait), a4);

        for size in PaperSize::ALL {
            let d = size.dimensions();
            let twice = d
                .apply_orientation(Orientation::Landscape)
                .apply_orientation(Orientation::Landscape);
            assert_eq!(twice, d);
        }
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!("landscape".parse::<Orientation>().unwrap(), Orientation::Landscape);
        assert_eq!(" Portrait ".parse::<Orientation>().unwrap(), Orientation::Portrait);
        assert!("sideways".parse::<Orientation>().is_err());
    }

    #[test]
    fn test_serde_uses_identifiers() {
        let json = serde_json::to_string(&PaperSize::HalfLetter).unwrap();
        assert_eq!(json, "\"Half Letter\"");
        let size: PaperSize = serde_json::from_str("\"Letter\"").unwrap();
        assert_eq!(size, PaperSize::Letter);
    }
}
