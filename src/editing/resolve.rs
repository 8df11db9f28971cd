//! Page attribute resolution
//!
//! Every read walks the live document; nothing about a page is cached.

use crate::document::{Document, Node};
use crate::editing::EditorState;
use crate::layout::{MarginConfig, Orientation, PaperSize, DEFAULT_PAPER_SIZE};
use crate::schema::{system_default_paper_colour, PaginationOptions};

/// Source of the current session's default page attributes
pub trait SessionDefaults {
    fn default_paper_size(&self) -> PaperSize;
    fn default_paper_colour(&self) -> String;
    fn default_paper_orientation(&self) -> Orientation;
    fn default_page_margins(&self) -> MarginConfig;
}

impl SessionDefaults for PaginationOptions {
    fn default_paper_size(&self) -> PaperSize {
        self.paper_size
    }

    fn default_paper_colour(&self) -> String {
        PaginationOptions::default_paper_colour(self)
    }

    fn default_paper_orientation(&self) -> Orientation {
        self.paper_orientation
    }

    fn default_page_margins(&self) -> MarginConfig {
        self.page_margins
    }
}

/// Fixed system defaults, usable without a live session
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDefaults;

impl SessionDefaults for SystemDefaults {
    fn default_paper_size(&self) -> PaperSize {
        DEFAULT_PAPER_SIZE
    }

    fn default_paper_colour(&self) -> String {
        system_default_paper_colour()
    }

    fn default_paper_orientation(&self) -> Orientation {
        Orientation::default()
    }

    fn default_page_margins(&self) -> MarginConfig {
        MarginConfig::default()
    }
}

/// Resolve an attribute of page `page_num`.
///
/// A page-less document yields the default. A page number past the last
/// page logs a warning and resolves the last page instead. A page that
/// leaves the attribute unset yields the default.
pub fn resolve<T>(
    state: &EditorState,
    page_num: usize,
    default: impl Fn() -> T,
    accessor: impl Fn(&Node) -> Option<T>,
) -> T {
    resolve_in(state.doc(), page_num, &default, &accessor, false)
}

fn resolve_in<T>(
    doc: &Document,
    page_num: usize,
    default: &dyn Fn() -> T,
    accessor: &dyn Fn(&Node) -> Option<T>,
    retried: bool,
) -> T {
    let Some(last_page_num) = doc.last_page_num() else {
        return default();
    };

    if page_num > last_page_num {
        if retried {
            // last_page_num was just derived from this document, so this
            // only happens if the page set changed under us
            log::error!("Page {} still out of range after clamping", page_num);
            return default();
        }
        log::warn!(
            "Page number {} is out of range (last page is {}), using the last page",
            page_num,
            last_page_num
        );
        return resolve_in(doc, last_page_num, default, accessor, true);
    }

    match doc.page(page_num) {
        Some(page) => accessor(page.node).unwrap_or_else(default),
        None => default(),
    }
}

/// Paper size of page `page_num`, defaulting to the session's configured size
pub fn get_page_paper_size(
    state: &EditorState,
    defaults: &impl SessionDefaults,
    page_num: usize,
) -> PaperSize {
    resolve(
        state,
        page_num,
        || defaults.default_paper_size(),
        |node| node.page_attrs().and_then(|attrs| attrs.paper_size),
    )
}

/// Paper size of page `page_num`, defaulting to the system default
pub fn get_page_paper_size_or_system_default(state: &EditorState, page_num: usize) -> PaperSize {
    get_page_paper_size(state, &SystemDefaults, page_num)
}

/// Paper colour of page `page_num`, defaulting to the session's configured colour
pub fn get_page_paper_colour(
    state: &EditorState,
    defaults: &impl SessionDefaults,
    page_num: usize,
) -> String {
    resolve(
        state,
        page_num,
        || defaults.default_paper_colour(),
        |node| node.page_attrs().and_then(|attrs| attrs.paper_colour.clone()),
    )
}

/// Paper colour of page `page_num`, defaulting to the system default
pub fn get_page_paper_colour_or_system_default(state: &EditorState, page_num: usize) -> String {
    get_page_paper_colour(state, &SystemDefaults, page_num)
}

pub fn get_page_paper_orientation(
    state: &EditorState,
    defaults: &impl SessionDefaults,
    page_num: usize,
) -> Orientation {
    resolve(
        state,
        page_num,
        || defaults.default_paper_orientation(),
        |node| node.page_attrs().and_then(|attrs| attrs.paper_orientation),
    )
}

pub fn get_page_margins(
    state: &EditorState,
    defaults: &impl SessionDefaults,
    page_num: usize,
) -> MarginConfig {
    resolve(
        state,
        page_num,
        || defaults.default_page_margins(),
        |node| node.page_attrs().and_then(|attrs| attrs.page_margins),
    )
}
