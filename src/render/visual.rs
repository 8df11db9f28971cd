//! Page visual descriptors and their CSS rendering

use crate::document::{Document, Node};
use crate::editing::SessionDefaults;
use crate::layout::{
    mm_to_css, MarginConfig, Orientation, PaperDimensions, PaperSize, PixelDimensions, PixelRatio,
};
use crate::schema::{DomElement, DomNode, PaginationOptions};
use serde::Serialize;

/// Border drawn around every page
pub const PAGE_BORDER: &str = "1px solid #ccc";

/// Fixed chrome applied to every page container
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageChrome {
    pub border: &'static str,
    /// Content outside the page box is clipped
    pub overflow_hidden: bool,
    /// Pages are centred horizontally
    pub centered: bool,
    /// Anchor for absolutely positioned children such as headers and footers
    pub position_relative: bool,
}

impl Default for PageChrome {
    fn default() -> Self {
        Self {
            border: PAGE_BORDER,
            overflow_hidden: true,
            centered: true,
            position_relative: true,
        }
    }
}

/// Everything a renderer needs to draw one page container
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageVisual {
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    /// Oriented paper dimensions in millimetres
    pub dimensions_mm: PaperDimensions,
    pub size_px: PixelDimensions,
    pub margins_mm: MarginConfig,
    pub padding_px: MarginConfig,
    pub background: String,
    pub gap_mm: f64,
    pub gap_px: f64,
    pub chrome: PageChrome,
}

impl PageVisual {
    /// Visual descriptor of a page node; `None` for other nodes
    pub fn for_page(
        node: &Node,
        defaults: &impl SessionDefaults,
        page_gap: f64,
        ratio: PixelRatio,
    ) -> Option<Self> {
        let attrs = node.page_attrs()?;
        let paper_size = attrs
            .paper_size
            .unwrap_or_else(|| defaults.default_paper_size());
        let orientation = attrs
            .paper_orientation
            .unwrap_or_else(|| defaults.default_paper_orientation());
        let margins_mm = attrs
            .page_margins
            .unwrap_or_else(|| defaults.default_page_margins());
        let background = attrs
            .paper_colour
            .clone()
            .unwrap_or_else(|| defaults.default_paper_colour());

        let dimensions_mm = paper_size.dimensions().apply_orientation(orientation);

        Some(Self {
            paper_size,
            orientation,
            dimensions_mm,
            size_px: dimensions_mm.to_pixels(ratio),
            margins_mm,
            padding_px: margins_mm.to_pixels(ratio),
            background,
            gap_mm: page_gap,
            gap_px: ratio.mm_to_px(page_gap),
            chrome: PageChrome::default(),
        })
    }

    /// Inline CSS for the page container
    pub fn to_style(&self) -> String {
        let (width, height) = self.dimensions_mm.to_css();
        let m = &self.margins_mm;
        let mut style = format!(
            "width: {}; height: {}; padding: {} {} {} {}; background-color: {}; margin-top: {};",
            width,
            height,
            mm_to_css(m.top),
            mm_to_css(m.right),
            mm_to_css(m.bottom),
            mm_to_css(m.left),
            self.background,
            mm_to_css(self.gap_mm),
        );
        style.push_str(&format!(" border: {};", self.chrome.border));
        if self.chrome.overflow_hidden {
            style.push_str(" overflow: hidden;");
        }
        if self.chrome.centered {
            style.push_str(" margin-left: auto; margin-right: auto;");
        }
        if self.chrome.position_relative {
            style.push_str(" position: relative;");
        }
        style.push_str(" box-sizing: border-box;");
        style
    }
}

/// Visual descriptors for every page, in page order
pub fn page_visuals(doc: &Document, options: &PaginationOptions, ratio: PixelRatio) -> Vec<PageVisual> {
    doc.pages()
        .filter_map(|page| PageVisual::for_page(page.node, options, options.page_gap, ratio))
        .collect()
}

/// In-editor view of a page: the stored wrapper plus its inline style
pub fn render_page_view(node: &Node, visual: &PageVisual) -> Option<DomElement> {
    match crate::schema::node_to_dom(node) {
        DomNode::Element(mut el) if node.is_page() => {
            el.set_attr("style", visual.to_style());
            Some(el)
        }
        _ => None,
    }
}
