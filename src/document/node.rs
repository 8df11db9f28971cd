//! Document tree nodes

use crate::layout::{MarginConfig, Orientation, PaperSize};
use serde::{Deserialize, Serialize};

/// Attributes stored on a page node.
///
/// `None` means the attribute is unset on the node and resolves to the
/// configured default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAttrs {
    pub paper_size: Option<PaperSize>,
    pub paper_colour: Option<String>,
    pub paper_orientation: Option<Orientation>,
    pub page_margins: Option<MarginConfig>,
}

impl PageAttrs {
    pub fn with_paper_size(mut self, size: PaperSize) -> Self {
        self.paper_size = Some(size);
        self
    }

    pub fn with_paper_colour(mut self, colour: impl Into<String>) -> Self {
        self.paper_colour = Some(colour.into());
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.paper_orientation = Some(orientation);
        self
    }

    pub fn with_margins(mut self, margins: MarginConfig) -> Self {
        self.page_margins = Some(margins);
        self
    }
}

/// The kind of a document node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Page container holding block nodes
    Page(PageAttrs),
    /// Regular paragraph holding inline nodes
    Paragraph,
    /// Heading with level (1-6) holding inline nodes
    Heading { level: u8 },
    /// Text run
    Text(String),
    /// Inline line break
    HardBreak,
}

/// A node in the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    content: Vec<Node>,
}

impl Node {
    /// Create a page node
    pub fn page(attrs: PageAttrs, content: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Page(attrs),
            content,
        }
    }

    /// Create a paragraph
    pub fn paragraph(content: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Paragraph,
            content,
        }
    }

    /// Create a heading, clamping the level to 1-6
    pub fn heading(level: u8, content: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Heading {
                level: level.clamp(1, 6),
            },
            content,
        }
    }

    /// Create a text node
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text(text.into()),
            content: Vec::new(),
        }
    }

    pub fn hard_break() -> Self {
        Self {
            kind: NodeKind::HardBreak,
            content: Vec::new(),
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn content(&self) -> &[Node] {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut Vec<Node> {
        &mut self.content
    }

    /// Name of the node type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Page(_) => "page",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading { .. } => "heading",
            NodeKind::Text(_) => "text",
            NodeKind::HardBreak => "hardBreak",
        }
    }

    pub fn is_page(&self) -> bool {
        matches!(self.kind, NodeKind::Page(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    /// Inline nodes live inside paragraphs and headings
    pub fn is_inline(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_) | NodeKind::HardBreak)
    }

    /// Leaf nodes cannot hold content
    pub fn is_leaf(&self) -> bool {
        self.is_inline()
    }

    pub fn page_attrs(&self) -> Option<&PageAttrs> {
        match &self.kind {
            NodeKind::Page(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn page_attrs_mut(&mut self) -> Option<&mut PageAttrs> {
        match &mut self.kind {
            NodeKind::Page(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// Whether the named attribute is set on this node
    pub fn has_attribute(&self, name: &str) -> bool {
        let Some(attrs) = self.page_attrs() else {
            return matches!((&self.kind, name), (NodeKind::Heading { .. }, "level"));
        };
        match name {
            "paperSize" => attrs.paper_size.is_some(),
            "paperColour" => attrs.paper_colour.is_some(),
            "paperOrientation" => attrs.paper_orientation.is_some(),
            "pageMargins" => attrs.page_margins.is_some(),
            _ => false,
        }
    }

    /// Size of this node in document positions
    pub fn node_size(&self) -> usize {
        match &self.kind {
            NodeKind::Text(text) => text.chars().count(),
            NodeKind::HardBreak => 1,
            _ => self.content_size() + 2,
        }
    }

    /// Size of the content in document positions
    pub fn content_size(&self) -> usize {
        self.content.iter().map(Node::node_size).sum()
    }

    /// Copy of the node without its content
    pub fn shallow(&self) -> Node {
        Node {
            kind: self.kind.clone(),
            content: Vec::new(),
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match &self.kind {
            NodeKind::Text(text) => text.clone(),
            _ => self.content.iter().map(Node::text_content).collect(),
        }
    }
}
