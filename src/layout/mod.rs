//! Paper geometry: sizes, orientation, margins and unit conversion

mod margins;
mod paper;
mod units;

pub use margins::{MarginConfig, DEFAULT_MARGIN_MM};
pub use paper::{
    dimensions_for, is_valid_paper_size, normalize_paper_size, Orientation, PaperDimensions,
    PaperSize, PixelDimensions, DEFAULT_PAPER_SIZE,
};
pub use units::{mm_to_css, PixelRatio};
