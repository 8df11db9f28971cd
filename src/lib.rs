//! Paged-Doc: pagination core for a rich-text editor
//!
//! This crate splits one continuous document into page containers and
//! manages their paper attributes:
//! - Paper geometry (sizes, orientation, margins, unit conversion)
//! - A page node schema with HTML load/save rules
//! - Per-page attribute resolution with default and out-of-range policies
//! - Validated, idempotent attribute setters over transactions
//! - Clipboard serialization that flattens page wrappers

pub mod document;
pub mod editing;
pub mod error;
pub mod layout;
pub mod render;
pub mod schema;
pub mod wasm;

#[cfg(test)]
mod test_log;

// Re-export WASM types for direct use
pub use wasm::WasmPagination;

// Re-export primary types
pub use document::{Document, Node, NodeKind, PageAttrs, PageRef};
pub use editing::{
    Dispatch, EditorState, PageAttribute, SessionDefaults, Step, SystemDefaults, Transaction,
};
pub use error::PageError;
pub use layout::{
    dimensions_for, is_valid_paper_size, MarginConfig, Orientation, PaperDimensions, PaperSize,
    PixelRatio,
};
pub use render::{ClipboardPlugin, ClipboardSerializer, DomSerializer, FragmentSerializer, PageVisual};
pub use schema::{is_valid_colour, PaginationOptions, Theme};

use editing::commands;
use editing::resolve;

/// An editing session: document state, pagination options and clipboard hook
pub struct PageEditor {
    state: EditorState,
    options: PaginationOptions,
    pixel_ratio: PixelRatio,
    clipboard: ClipboardPlugin,
}

impl PageEditor {
    /// Create an editor over `doc`
    pub fn new(doc: Document, options: PaginationOptions) -> Self {
        Self {
            state: EditorState::new(doc),
            options: options.normalized(),
            pixel_ratio: PixelRatio::default(),
            clipboard: ClipboardPlugin::default(),
        }
    }

    /// Create an editor from HTML markup
    pub fn from_html(html: &str, options: PaginationOptions) -> error::Result<Self> {
        Ok(Self::new(Document::from_html(html)?, options))
    }

    /// Use a different millimetre to pixel ratio for page visuals
    pub fn with_pixel_ratio(mut self, ratio: PixelRatio) -> Self {
        self.pixel_ratio = ratio;
        self
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn doc(&self) -> &Document {
        self.state.doc()
    }

    pub fn options(&self) -> &PaginationOptions {
        &self.options
    }

    pub fn page_count(&self) -> usize {
        self.doc().page_count()
    }

    /// Page a document position belongs to
    pub fn page_num_at(&self, pos: usize) -> Option<usize> {
        self.doc().page_num_at(pos)
    }

    pub fn paper_size(&self, page_num: usize) -> PaperSize {
        resolve::get_page_paper_size(&self.state, &self.options, page_num)
    }

    pub fn paper_colour(&self, page_num: usize) -> String {
        resolve::get_page_paper_colour(&self.state, &self.options, page_num)
    }

    pub fn paper_orientation(&self, page_num: usize) -> Orientation {
        resolve::get_page_paper_orientation(&self.state, &self.options, page_num)
    }

    pub fn page_margins(&self, page_num: usize) -> MarginConfig {
        resolve::get_page_margins(&self.state, &self.options, page_num)
    }

    /// Run a command against a fresh transaction and apply it if dispatched
    fn run_command(&mut self, command: impl FnOnce(&mut Transaction, Dispatch<'_>) -> bool) -> bool {
        let mut tr = self.state.tr();
        let mut dispatched = false;
        let mut mark = |_: &Transaction| dispatched = true;
        let dispatch: Dispatch<'_> = Some(&mut mark);
        let applied = command(&mut tr, dispatch);

        if applied && dispatched {
            self.state = std::mem::take(&mut self.state).apply_owned(tr);
        }
        applied
    }

    /// Position and attribute snapshot of page `page_num`
    fn page_target(&self, page_num: usize) -> Option<(usize, Node)> {
        match self.doc().page(page_num) {
            Some(page) => Some((page.pos, page.node.shallow())),
            None => {
                log::warn!(
                    "Page {} does not exist, the document has {} pages",
                    page_num,
                    self.page_count()
                );
                None
            }
        }
    }

    pub fn set_page_paper_size(&mut self, page_num: usize, size: &str) -> bool {
        let Some((pos, _)) = self.page_target(page_num) else {
            return false;
        };
        self.run_command(|tr, dispatch| commands::set_paper_size(tr, dispatch, pos, size))
    }

    pub fn set_page_paper_colour(&mut self, page_num: usize, colour: &str) -> bool {
        let Some((pos, node)) = self.page_target(page_num) else {
            return false;
        };
        self.run_command(|tr, dispatch| {
            commands::set_paper_colour_on_node(tr, dispatch, pos, &node, colour)
        })
    }

    pub fn set_page_paper_orientation(&mut self, page_num: usize, orientation: Orientation) -> bool {
        let Some((pos, node)) = self.page_target(page_num) else {
            return false;
        };
        self.run_command(|tr, dispatch| {
            commands::set_paper_orientation_on_node(tr, dispatch, pos, &node, orientation)
        })
    }

    pub fn set_page_margins(&mut self, page_num: usize, margins: MarginConfig) -> bool {
        let Some((pos, node)) = self.page_target(page_num) else {
            return false;
        };
        self.run_command(|tr, dispatch| {
            commands::set_page_margins_on_node(tr, dispatch, pos, &node, margins)
        })
    }

    pub fn set_document_paper_size(&mut self, size: &str) -> bool {
        self.run_command(|tr, dispatch| commands::set_document_paper_size(tr, dispatch, size))
    }

    pub fn set_document_paper_colour(&mut self, colour: &str) -> bool {
        self.run_command(|tr, dispatch| commands::set_document_paper_colour(tr, dispatch, colour))
    }

    pub fn set_document_paper_orientation(&mut self, orientation: Orientation) -> bool {
        self.run_command(|tr, dispatch| {
            commands::set_document_paper_orientation(tr, dispatch, orientation)
        })
    }

    pub fn set_document_page_margins(&mut self, margins: MarginConfig) -> bool {
        self.run_command(|tr, dispatch| commands::set_document_page_margins(tr, dispatch, margins))
    }

    /// Change the session default used by pages without their own size
    pub fn set_default_paper_size(&mut self, size: &str) -> bool {
        match size.parse::<PaperSize>() {
            Ok(size) => {
                self.options.paper_size = size;
                true
            }
            Err(err) => {
                log::warn!("{}", err);
                false
            }
        }
    }

    /// Change the session default used by pages without their own colour
    pub fn set_default_paper_colour(&mut self, colour: &str) -> bool {
        if !is_valid_colour(colour) {
            log::warn!("{}", PageError::InvalidColour(colour.to_string()));
            return false;
        }
        self.options.paper_colour = Some(colour.trim().to_string());
        true
    }

    pub fn set_default_paper_orientation(&mut self, orientation: Orientation) {
        self.options.paper_orientation = orientation;
    }

    pub fn set_default_page_margins(&mut self, margins: MarginConfig) -> bool {
        if let Err(err) = margins.validate() {
            log::warn!("{}", err);
            return false;
        }
        self.options.page_margins = margins;
        true
    }

    /// Follow the device theme for pages without an explicit colour
    pub fn set_theme(&mut self, theme: Theme) {
        self.options.theme = theme;
    }

    /// Visual descriptors for every page
    pub fn page_visuals(&self) -> Vec<PageVisual> {
        render::page_visuals(self.doc(), &self.options, self.pixel_ratio)
    }

    /// Document markup with page wrappers, for saving
    pub fn to_html(&self) -> String {
        self.doc().to_html()
    }

    /// Markup for copying the blocks between `from` and `to`, without page wrappers
    pub fn copy_html(&self, from: usize, to: usize) -> String {
        self.clipboard.copy_html(self.doc(), from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PAGES: &str = concat!(
        r#"<div data-page data-paper-size="A5"><p>first</p></div>"#,
        r#"<div data-page><h1>second</h1><p>more</p></div>"#,
    );

    fn editor() -> PageEditor {
        PageEditor::from_html(TWO_PAGES, PaginationOptions::default()).unwrap()
    }

    #[test]
    fn test_create_editor() {
        let editor = editor();
        assert_eq!(editor.page_count(), 2);
        assert_eq!(editor.paper_size(0), PaperSize::A5);
        assert_eq!(editor.paper_size(1), PaperSize::A4);
        assert_eq!(editor.paper_size(9), PaperSize::A4);
        assert_eq!(editor.page_num_at(0), Some(0));
    }

    #[test]
    fn test_set_page_attributes() {
        let mut editor = editor();
        assert!(editor.set_page_paper_size(1, "Letter"));
        assert!(!editor.set_page_paper_size(1, "Letter"));
        assert!(!editor.set_page_paper_size(2, "Letter"));
        assert!(editor.set_page_paper_colour(0, "lavender"));
        assert!(editor.set_page_paper_orientation(0, Orientation::Landscape));
        assert!(editor.set_page_margins(1, MarginConfig::all(12.0)));
        assert_eq!(editor.state().version(), 4);

        assert_eq!(editor.paper_size(1), PaperSize::Letter);
        assert_eq!(editor.paper_colour(0), "lavender");
        assert_eq!(editor.paper_orientation(0), Orientation::Landscape);
        assert_eq!(editor.page_margins(1), MarginConfig::all(12.0));
    }

    #[test]
    fn test_session_defaults_apply_to_unset_pages() {
        let mut editor = editor();
        assert!(editor.set_default_paper_size("B5"));
        assert!(!editor.set_default_paper_size("Z1"));
        assert!(editor.set_default_paper_colour("#000"));
        assert!(!editor.set_default_paper_colour("#0000000"));
        assert!(!editor.set_default_page_margins(MarginConfig::all(f64::NAN)));

        assert_eq!(editor.paper_size(0), PaperSize::A5);
        assert_eq!(editor.paper_size(1), PaperSize::B5);
        assert_eq!(editor.paper_colour(1), "#000");
        assert_eq!(editor.state().version(), 0);
    }

    #[test]
    fn test_document_wide_commands() {
        let mut editor = editor();
        assert!(editor.set_document_paper_size("A3"));
        assert!(editor.set_document_paper_colour("white"));
        assert!(editor.set_document_paper_orientation(Orientation::Landscape));
        assert!(editor.set_document_page_margins(MarginConfig::all(1.0)));
        assert!(!editor.set_document_paper_size("A3"));
        assert_eq!(editor.state().version(), 4);
        assert!((0..2).all(|n| editor.paper_size(n) == PaperSize::A3));
    }

    #[test]
    fn test_visuals_follow_theme() {
        let mut editor = editor();
        editor.set_theme(Theme::Dark);
        let visuals = editor.page_visuals();
        assert_eq!(visuals.len(), 2);
        assert_eq!(visuals[0].paper_size, PaperSize::A5);
        assert_eq!(visuals[1].background, "#1E1E1E");
    }

    #[test]
    fn test_save_and_copy() {
        let editor = editor();
        let html = editor.to_html();
        assert_eq!(Document::from_html(&html).unwrap(), *editor.doc());

        let copied = editor.copy_html(0, editor.doc().content_size());
        assert_eq!(copied, "<p>first</p><h1>second</h1><p>more</p>");
    }
}
