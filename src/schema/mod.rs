//! Page node schema: attribute declarations, extension options and HTML rules

pub mod colour;
mod html;

pub use colour::{is_valid_colour, system_default_paper_colour, Theme};
pub use html::{is_page_element, parse_html, to_html, DomElement, DomNode};
pub(crate) use html::node_to_dom;

use crate::document::PageAttrs;
use crate::layout::{
    normalize_paper_size, MarginConfig, Orientation, PaperSize, DEFAULT_PAPER_SIZE,
};
use serde::{Deserialize, Serialize};

/// Boolean attribute marking an element as a page container
pub const PAGE_MARKER_ATTR: &str = "data-page";

/// Class applied to rendered page containers
pub const PAGE_CLASS: &str = "page";

/// Default gap before each page, in millimetres
pub const DEFAULT_PAGE_GAP_MM: f64 = 10.0;

/// Declaration of one page attribute: default value and HTML (de)serialization
pub struct AttributeSpec<T: 'static> {
    /// Attribute name on the page node
    pub name: &'static str,
    /// Attribute name on the rendered element
    pub html_name: &'static str,
    pub default: fn() -> T,
    /// `None` when the persisted text is not a valid value
    pub parse: fn(&str) -> Option<T>,
    pub render: fn(&T) -> String,
    pub get: fn(&PageAttrs) -> Option<&T>,
    pub set: fn(&mut PageAttrs, Option<T>),
}

impl<T: 'static> AttributeSpec<T> {
    /// Read the attribute from an element.
    ///
    /// Missing attributes stay unset; malformed values fall back to the
    /// default instead of failing the load.
    pub fn read(&self, el: &DomElement) -> Option<T> {
        el.attr(self.html_name)
            .map(|text| (self.parse)(text).unwrap_or_else(self.default))
    }

    /// Persisted form of the attribute if it is set on `attrs`
    pub fn write(&self, attrs: &PageAttrs) -> Option<(&'static str, String)> {
        (self.get)(attrs).map(|value| (self.html_name, (self.render)(value)))
    }
}

pub const PAPER_SIZE_ATTR: AttributeSpec<PaperSize> = AttributeSpec {
    name: "paperSize",
    html_name: "data-paper-size",
    default: || DEFAULT_PAPER_SIZE,
    parse: |text| Some(normalize_paper_size(text.trim())),
    render: |size| size.as_str().to_string(),
    get: |attrs| attrs.paper_size.as_ref(),
    set: |attrs, value| attrs.paper_size = value,
};

pub const PAPER_COLOUR_ATTR: AttributeSpec<String> = AttributeSpec {
    name: "paperColour",
    html_name: "data-paper-colour",
    default: system_default_paper_colour,
    parse: |text| is_valid_colour(text).then(|| text.trim().to_string()),
    render: |colour| colour.clone(),
    get: |attrs| attrs.paper_colour.as_ref(),
    set: |attrs, value| attrs.paper_colour = value,
};

pub const PAPER_ORIENTATION_ATTR: AttributeSpec<Orientation> = AttributeSpec {
    name: "paperOrientation",
    html_name: "data-paper-orientation",
    default: Orientation::default,
    parse: |text| text.parse().ok(),
    render: |orientation| orientation.as_str().to_string(),
    get: |attrs| attrs.paper_orientation.as_ref(),
    set: |attrs, value| attrs.paper_orientation = value,
};

pub const PAGE_MARGINS_ATTR: AttributeSpec<MarginConfig> = AttributeSpec {
    name: "pageMargins",
    html_name: "data-page-margins",
    default: MarginConfig::default,
    parse: |text| Some(MarginConfig::parse_or_default(text)),
    render: MarginConfig::to_json,
    get: |attrs| attrs.page_margins.as_ref(),
    set: |attrs, value| attrs.page_margins = value,
};

/// Read every declared page attribute from an element
pub fn page_attrs_from_element(el: &DomElement) -> PageAttrs {
    let mut attrs = PageAttrs::default();
    (PAPER_SIZE_ATTR.set)(&mut attrs, PAPER_SIZE_ATTR.read(el));
    (PAPER_COLOUR_ATTR.set)(&mut attrs, PAPER_COLOUR_ATTR.read(el));
    (PAPER_ORIENTATION_ATTR.set)(&mut attrs, PAPER_ORIENTATION_ATTR.read(el));
    (PAGE_MARGINS_ATTR.set)(&mut attrs, PAGE_MARGINS_ATTR.read(el));
    attrs
}

/// Persisted attributes of a page, in declaration order
pub fn page_attrs_to_html(attrs: &PageAttrs) -> Vec<(&'static str, String)> {
    [
        PAPER_SIZE_ATTR.write(attrs),
        PAPER_COLOUR_ATTR.write(attrs),
        PAPER_ORIENTATION_ATTR.write(attrs),
        PAGE_MARGINS_ATTR.write(attrs),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Extension-level configuration.
///
/// The paper defaults apply wherever a page node leaves the attribute unset;
/// `page_gap` is a per-instance setting never stored on nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationOptions {
    pub paper_size: PaperSize,
    /// `None` picks the theme's default colour
    pub paper_colour: Option<String>,
    pub paper_orientation: Orientation,
    pub page_margins: MarginConfig,
    /// Gap before each page in millimetres
    pub page_gap: f64,
    pub theme: Theme,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            paper_size: DEFAULT_PAPER_SIZE,
            paper_colour: None,
            paper_orientation: Orientation::Portrait,
            page_margins: MarginConfig::default(),
            page_gap: DEFAULT_PAGE_GAP_MM,
            theme: Theme::Light,
        }
    }
}

impl PaginationOptions {
    /// Parse options from JSON, normalizing invalid values
    pub fn from_json(text: &str) -> crate::error::Result<Self> {
        let options: PaginationOptions = serde_json::from_str(text)?;
        Ok(options.normalized())
    }

    /// Replace invalid colour, margins and gap with defaults
    pub fn normalized(mut self) -> Self {
        if let Some(colour) = &self.paper_colour {
            if !is_valid_colour(colour) {
                log::warn!("Invalid default paper colour {:?}, using theme default", colour);
                self.paper_colour = None;
            }
        }
        if self.page_margins.validate().is_err() {
            log::warn!("Invalid default page margins {:?}, using defaults", self.page_margins);
            self.page_margins = MarginConfig::default();
        }
        if !self.page_gap.is_finite() || self.page_gap < 0.0 {
            log::warn!("Invalid page gap {}, using {}", self.page_gap, DEFAULT_PAGE_GAP_MM);
            self.page_gap = DEFAULT_PAGE_GAP_MM;
        }
        self
    }

    /// Effective default paper colour for this configuration
    pub fn default_paper_colour(&self) -> String {
        self.paper_colour
            .clone()
            .unwrap_or_else(|| self.theme.default_paper_colour().to_string())
    }
}
