//! WASM bindings for the pagination core

use crate::{MarginConfig, Orientation, PageEditor, PaginationOptions, Theme};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Parse a JSON payload into a JS value, `null` on failure
fn json_to_js(json: &str) -> JsValue {
    js_sys::JSON::parse(json).unwrap_or(JsValue::NULL)
}

fn parse_orientation(value: &str) -> Option<Orientation> {
    match value.parse::<Orientation>() {
        Ok(orientation) => Some(orientation),
        Err(err) => {
            log::warn!("{}", err);
            None
        }
    }
}

fn parse_margins(json: &str) -> Option<MarginConfig> {
    match MarginConfig::from_json(json) {
        Ok(margins) => Some(margins),
        Err(err) => {
            log::warn!("{}", err);
            None
        }
    }
}

/// WASM-exposed pagination session
#[wasm_bindgen]
pub struct WasmPagination {
    editor: PageEditor,
}

#[wasm_bindgen]
impl WasmPagination {
    /// Load a document from HTML; `options` is a JSON object, empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(html: &str, options: &str) -> Result<WasmPagination, JsValue> {
        let options = if options.trim().is_empty() {
            PaginationOptions::default()
        } else {
            PaginationOptions::from_json(options).map_err(js_error)?
        };
        let editor = PageEditor::from_html(html, options).map_err(js_error)?;
        Ok(Self { editor })
    }

    #[wasm_bindgen(js_name = getPageCount)]
    pub fn get_page_count(&self) -> usize {
        self.editor.page_count()
    }

    #[wasm_bindgen(js_name = getVersion)]
    pub fn get_version(&self) -> u64 {
        self.editor.state().version()
    }

    /// Page containing a document position
    #[wasm_bindgen(js_name = pageNumAt)]
    pub fn page_num_at(&self, pos: usize) -> Option<u32> {
        self.editor.page_num_at(pos).map(|n| n as u32)
    }

    #[wasm_bindgen(js_name = getPaperSize)]
    pub fn get_paper_size(&self, page_num: usize) -> String {
        self.editor.paper_size(page_num).to_string()
    }

    #[wasm_bindgen(js_name = getPaperColour)]
    pub fn get_paper_colour(&self, page_num: usize) -> String {
        self.editor.paper_colour(page_num)
    }

    #[wasm_bindgen(js_name = getPaperOrientation)]
    pub fn get_paper_orientation(&self, page_num: usize) -> String {
        self.editor.paper_orientation(page_num).to_string()
    }

    /// Margins of a page as `{top, right, bottom, left}` in millimetres
    #[wasm_bindgen(js_name = getPageMargins)]
    pub fn get_page_margins(&self, page_num: usize) -> JsValue {
        json_to_js(&self.editor.page_margins(page_num).to_json())
    }

    #[wasm_bindgen(js_name = setPagePaperSize)]
    pub fn set_page_paper_size(&mut self, page_num: usize, size: &str) -> bool {
        self.editor.set_page_paper_size(page_num, size)
    }

    #[wasm_bindgen(js_name = setPagePaperColour)]
    pub fn set_page_paper_colour(&mut self, page_num: usize, colour: &str) -> bool {
        self.editor.set_page_paper_colour(page_num, colour)
    }

    #[wasm_bindgen(js_name = setPagePaperOrientation)]
    pub fn set_page_paper_orientation(&mut self, page_num: usize, orientation: &str) -> bool {
        parse_orientation(orientation)
            .is_some_and(|o| self.editor.set_page_paper_orientation(page_num, o))
    }

    #[wasm_bindgen(js_name = setPageMargins)]
    pub fn set_page_margins(&mut self, page_num: usize, margins: &str) -> bool {
        parse_margins(margins).is_some_and(|m| self.editor.set_page_margins(page_num, m))
    }

    #[wasm_bindgen(js_name = setDocumentPaperSize)]
    pub fn set_document_paper_size(&mut self, size: &str) -> bool {
        self.editor.set_document_paper_size(size)
    }

    #[wasm_bindgen(js_name = setDocumentPaperColour)]
    pub fn set_document_paper_colour(&mut self, colour: &str) -> bool {
        self.editor.set_document_paper_colour(colour)
    }

    #[wasm_bindgen(js_name = setDocumentPaperOrientation)]
    pub fn set_document_paper_orientation(&mut self, orientation: &str) -> bool {
        parse_orientation(orientation)
            .is_some_and(|o| self.editor.set_document_paper_orientation(o))
    }

    #[wasm_bindgen(js_name = setDocumentPageMargins)]
    pub fn set_document_page_margins(&mut self, margins: &str) -> bool {
        parse_margins(margins).is_some_and(|m| self.editor.set_document_page_margins(m))
    }

    #[wasm_bindgen(js_name = setDefaultPaperSize)]
    pub fn set_default_paper_size(&mut self, size: &str) -> bool {
        self.editor.set_default_paper_size(size)
    }

    #[wasm_bindgen(js_name = setDefaultPaperColour)]
    pub fn set_default_paper_colour(&mut self, colour: &str) -> bool {
        self.editor.set_default_paper_colour(colour)
    }

    #[wasm_bindgen(js_name = setDefaultPaperOrientation)]
    pub fn set_default_paper_orientation(&mut self, orientation: &str) -> bool {
        match parse_orientation(orientation) {
            Some(o) => {
                self.editor.set_default_paper_orientation(o);
                true
            }
            None => false,
        }
    }

    #[wasm_bindgen(js_name = setDefaultPageMargins)]
    pub fn set_default_page_margins(&mut self, margins: &str) -> bool {
        parse_margins(margins).is_some_and(|m| self.editor.set_default_page_margins(m))
    }

    /// Switch between the light and dark default paper colour
    #[wasm_bindgen(js_name = setDarkTheme)]
    pub fn set_dark_theme(&mut self, dark: bool) {
        self.editor
            .set_theme(if dark { Theme::Dark } else { Theme::Light });
    }

    /// Visual descriptors of every page (returns JSON)
    #[wasm_bindgen(js_name = getPageVisuals)]
    pub fn get_page_visuals(&self) -> JsValue {
        json_to_js(&self.page_visuals_json())
    }

    /// Document markup for saving
    #[wasm_bindgen(js_name = getHtml)]
    pub fn get_html(&self) -> String {
        self.editor.to_html()
    }

    /// Clipboard markup for a selection, without page wrappers
    #[wasm_bindgen(js_name = copyHtml)]
    pub fn copy_html(&self, from: usize, to: usize) -> String {
        self.editor.copy_html(from, to)
    }
}

impl WasmPagination {
    fn page_visuals_json(&self) -> String {
        serde_json::to_string(&self.editor.page_visuals()).unwrap_or_else(|err| {
            log::error!("Failed to serialize page visuals: {}", err);
            "[]".to_string()
        })
    }
}
