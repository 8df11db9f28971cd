//! Error types for the pagination core

use thiserror::Error;

/// Failures raised by the fallible building blocks of the crate.
///
/// Commands and resolvers never surface these to the host: they log the
/// error and return a sentinel (`false` or a default value) instead.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("Unknown paper size: {0:?}")]
    InvalidPaperSize(String),

    #[error("Unknown paper orientation: {0:?}")]
    InvalidOrientation(String),

    #[error("Invalid colour value: {0:?}")]
    InvalidColour(String),

    #[error("Invalid page margins: {0}")]
    InvalidMargins(String),

    #[error("No node at position {0}")]
    NoNodeAtPosition(usize),

    #[error("Node at position {pos} is a {found}, not a page")]
    NotAPageNode { pos: usize, found: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTML error: {0}")]
    Html(#[from] quick_xml::Error),

    #[error("HTML attribute error: {0}")]
    HtmlAttribute(#[from] quick_xml::events::attributes::AttrError),
}

pub type Result<T> = std::result::Result<T, PageError>;
