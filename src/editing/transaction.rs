//! Editor state snapshots and transactions

use crate::document::{Document, Node, PageAttrs};
use crate::error::{PageError, Result};
use crate::layout::{MarginConfig, Orientation, PaperSize};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// A single page attribute assignment. `None` clears the attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum PageAttribute {
    PaperSize(Option<PaperSize>),
    PaperColour(Option<String>),
    PaperOrientation(Option<Orientation>),
    PageMargins(Option<MarginConfig>),
}

impl PageAttribute {
    /// Attribute name as declared on the page node
    pub fn name(&self) -> &'static str {
        match self {
            PageAttribute::PaperSize(_) => "paperSize",
            PageAttribute::PaperColour(_) => "paperColour",
            PageAttribute::PaperOrientation(_) => "paperOrientation",
            PageAttribute::PageMargins(_) => "pageMargins",
        }
    }

    /// Whether `attrs` already stores this value; `None` only matches an unset attribute
    pub fn is_set_on(&self, attrs: &PageAttrs) -> bool {
        match self {
            PageAttribute::PaperSize(v) => attrs.paper_size == *v,
            PageAttribute::PaperColour(v) => attrs.paper_colour == *v,
            PageAttribute::PaperOrientation(v) => attrs.paper_orientation == *v,
            PageAttribute::PageMargins(v) => attrs.page_margins == *v,
        }
    }

    fn write(self, attrs: &mut PageAttrs) {
        match self {
            PageAttribute::PaperSize(v) => attrs.paper_size = v,
            PageAttribute::PaperColour(v) => attrs.paper_colour = v,
            PageAttribute::PaperOrientation(v) => attrs.paper_orientation = v,
            PageAttribute::PageMargins(v) => attrs.page_margins = v,
        }
    }
}

/// A recorded change
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    SetPageAttribute { pos: usize, attr: PageAttribute },
}

/// Immutable editor state
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    doc: Document,
    version: u64,
}

impl EditorState {
    pub fn new(doc: Document) -> Self {
        Self { doc, version: 0 }
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    /// Monotonic version, bumped by every applied transaction that changed the document
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Start a transaction against this state
    pub fn tr(&self) -> Transaction {
        Transaction {
            doc: self.doc.clone(),
            steps: SmallVec::new(),
            invalidated_pages: FxHashSet::default(),
            base_version: self.version,
        }
    }

    /// Apply a transaction, producing the next state
    pub fn apply(&self, tr: &Transaction) -> EditorState {
        if !tr.doc_changed() {
            return self.clone();
        }
        EditorState {
            doc: tr.doc.clone(),
            version: self.version + 1,
        }
    }

    /// Apply a transaction, consuming it
    pub fn apply_owned(self, tr: Transaction) -> EditorState {
        if !tr.doc_changed() {
            return self;
        }
        EditorState {
            doc: tr.doc,
            version: self.version + 1,
        }
    }
}

/// A set of pending changes against an [`EditorState`]
#[derive(Debug, Clone)]
pub struct Transaction {
    doc: Document,
    steps: SmallVec<[Step; 4]>,
    invalidated_pages: FxHashSet<usize>,
    base_version: u64,
}

impl Transaction {
    /// The document with all steps so far applied
    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn doc_changed(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Version of the state this transaction started from
    pub fn base_version(&self) -> u64 {
        self.base_version
    }

    /// Positions of pages whose derived state (layout, visuals) must be recomputed
    pub fn invalidated_pages(&self) -> &FxHashSet<usize> {
        &self.invalidated_pages
    }

    /// Set an attribute on the page node at `pos`.
    ///
    /// Fails without touching the transaction when no node starts at `pos`
    /// or the node there is not a page.
    pub fn set_node_attribute(&mut self, pos: usize, attr: PageAttribute) -> Result<()> {
        let node: &mut Node = self
            .doc
            .node_at_mut(pos)
            .ok_or(PageError::NoNodeAtPosition(pos))?;
        let found = node.type_name();
        let attrs = node
            .page_attrs_mut()
            .ok_or(PageError::NotAPageNode { pos, found })?;

        attr.clone().write(attrs);
        self.steps.push(Step::SetPageAttribute { pos, attr });
        self.invalidated_pages.insert(pos);
        Ok(())
    }
}
