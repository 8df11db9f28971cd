//! HTML model for loading and saving documents

use super::{page_attrs_from_element, page_attrs_to_html, PAGE_CLASS, PAGE_MARKER_ATTR};
use crate::document::{Document, Node, NodeKind};
use crate::error::Result;
use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use smallvec::SmallVec;

/// Elements that never have content or a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// An HTML element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DomElement {
    pub tag: String,
    pub attrs: SmallVec<[(String, String); 4]>,
    pub children: Vec<DomNode>,
}

/// An HTML node
#[derive(Debug, Clone, PartialEq)]
pub enum DomNode {
    Element(DomElement),
    Text(String),
}

impl DomElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn with_children(mut self, children: Vec<DomNode>) -> Self {
        self.children = children;
        self
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(value, true, out);
            out.push('"');
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

impl DomNode {
    pub fn as_element(&self) -> Option<&DomElement> {
        match self {
            DomNode::Element(el) => Some(el),
            DomNode::Text(_) => None,
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            DomNode::Element(el) => el.write_html(out),
            DomNode::Text(text) => escape_into(text, false, out),
        }
    }
}

/// Serialize DOM nodes to markup
pub fn to_html(nodes: &[DomNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// An element is a page iff it carries the page marker and its parent does not
pub fn is_page_element(el: &DomElement, parent: Option<&DomElement>) -> bool {
    el.has_attr(PAGE_MARKER_ATTR) && !parent.is_some_and(|p| p.has_attr(PAGE_MARKER_ATTR))
}

/// Read HTML markup into DOM nodes.
///
/// Accepts valueless attributes, unclosed void elements and mismatched end
/// tags the way browsers do. HTML named entities are decoded; text or
/// attribute values with unknown entities or bare `&` are kept as written.
/// Only markup the reader cannot tokenize is an error.
pub fn parse_html(html: &str) -> Result<Vec<DomNode>> {
    let mut reader = Reader::from_str(html);
    reader.config_mut().check_end_names = false;

    let mut roots: Vec<DomNode> = Vec::new();
    let mut stack: Vec<DomElement> = Vec::new();

    fn push(node: DomNode, stack: &mut [DomElement], roots: &mut Vec<DomNode>) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let el = element_from(&start)?;
                if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                    push(DomNode::Element(el), &mut stack, &mut roots);
                } else {
                    stack.push(el);
                }
            }
            Event::Empty(start) => {
                let el = element_from(&start)?;
                push(DomNode::Element(el), &mut stack, &mut roots);
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).to_ascii_lowercase();
                // Close up to the matching open element; stray end tags are dropped
                if let Some(depth) = stack.iter().rposition(|el| el.tag == name) {
                    while stack.len() > depth {
                        if let Some(el) = stack.pop() {
                            push(DomNode::Element(el), &mut stack, &mut roots);
                        }
                    }
                }
            }
            Event::Text(text) => {
                let text = match text.unescape_with(resolve_html5_entity) {
                    Ok(decoded) => decoded.into_owned(),
                    Err(err) => {
                        log::warn!("Keeping text with undecodable entities as written: {}", err);
                        String::from_utf8_lossy(&text).into_owned()
                    }
                };
                if !text.is_empty() {
                    push(DomNode::Text(text), &mut stack, &mut roots);
                }
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data).into_owned();
                push(DomNode::Text(text), &mut stack, &mut roots);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    while let Some(el) = stack.pop() {
        push(DomNode::Element(el), &mut stack, &mut roots);
    }

    Ok(roots)
}

fn element_from(start: &BytesStart<'_>) -> Result<DomElement> {
    let mut el = DomElement::new(String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase());
    for attr in start.html_attributes() {
        let attr = attr?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
        let value = match attr.unescape_value_with(resolve_html5_entity) {
            Ok(decoded) => decoded.into_owned(),
            Err(err) => {
                log::warn!("Keeping attribute {} as written: {}", name, err);
                String::from_utf8_lossy(&attr.value).into_owned()
            }
        };
        el.set_attr(name, value);
    }
    Ok(el)
}

/// Collects block nodes, wrapping stray inline content into paragraphs
#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Node>,
    inline: Vec<Node>,
}

impl BlockBuilder {
    fn push_block(&mut self, node: Node) {
        self.flush_inline();
        self.blocks.push(node);
    }

    fn push_inline(&mut self, node: Node) {
        self.inline.push(node);
    }

    fn flush_inline(&mut self) {
        if self.inline.is_empty() {
            return;
        }
        let only_whitespace = self
            .inline
            .iter()
            .all(|node| matches!(node.kind(), NodeKind::Text(t) if t.trim().is_empty()));
        let content = std::mem::take(&mut self.inline);
        if !only_whitespace {
            self.blocks.push(Node::paragraph(content));
        }
    }

    fn finish(mut self) -> Vec<Node> {
        self.flush_inline();
        self.blocks
    }
}

fn heading_level(tag: &str) -> Option<u8> {
    let level = tag.strip_prefix('h')?.parse::<u8>().ok()?;
    (1..=6).contains(&level).then_some(level)
}

/// Read block-level DOM content; `parent` is the element holding `nodes`.
///
/// Below a page, marker elements at any depth are ordinary wrappers.
fn read_blocks(
    nodes: &[DomNode],
    parent: Option<&DomElement>,
    inside_page: bool,
    out: &mut BlockBuilder,
) {
    for node in nodes {
        match node {
            DomNode::Text(text) => out.push_inline(Node::text(text.clone())),
            DomNode::Element(el) => {
                if !inside_page && is_page_element(el, parent) {
                    let mut content = BlockBuilder::default();
                    read_blocks(&el.children, Some(el), true, &mut content);
                    out.push_block(Node::page(page_attrs_from_element(el), content.finish()));
                } else if el.tag == "p" {
                    out.push_block(Node::paragraph(read_inline(&el.children)));
                } else if let Some(level) = heading_level(&el.tag) {
                    out.push_block(Node::heading(level, read_inline(&el.children)));
                } else if el.tag == "br" {
                    out.push_inline(Node::hard_break());
                } else {
                    // Unknown wrappers, including rejected nested pages, are transparent
                    read_blocks(&el.children, Some(el), inside_page, out);
                }
            }
        }
    }
}

fn read_inline(nodes: &[DomNode]) -> Vec<Node> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            DomNode::Text(text) => out.push(Node::text(text.clone())),
            DomNode::Element(el) if el.tag == "br" => out.push(Node::hard_break()),
            DomNode::Element(el) => out.extend(read_inline(&el.children)),
        }
    }
    out
}

/// Render a node with its page wrapper, as stored and shown in the editor
pub(crate) fn node_to_dom(node: &Node) -> DomNode {
    let children = || node.content().iter().map(node_to_dom).collect::<Vec<_>>();
    match node.kind() {
        NodeKind::Page(attrs) => {
            let mut el = DomElement::new("div");
            el.set_attr(PAGE_MARKER_ATTR, "true");
            el.set_attr("class", PAGE_CLASS);
            for (name, value) in page_attrs_to_html(attrs) {
                el.set_attr(name, value);
            }
            DomNode::Element(el.with_children(children()))
        }
        NodeKind::Paragraph => DomNode::Element(DomElement::new("p").with_children(children())),
        NodeKind::Heading { level } => {
            DomNode::Element(DomElement::new(format!("h{}", level)).with_children(children()))
        }
        NodeKind::Text(text) => DomNode::Text(text.clone()),
        NodeKind::HardBreak => DomNode::Element(DomElement::new("br")),
    }
}

impl Document {
    /// Build a document from DOM nodes
    pub fn from_dom(nodes: &[DomNode]) -> Self {
        let mut blocks = BlockBuilder::default();
        read_blocks(nodes, None, false, &mut blocks);
        Document::from_nodes(blocks.finish())
    }

    /// Parse a document from HTML markup
    pub fn from_html(html: &str) -> Result<Self> {
        Ok(Self::from_dom(&parse_html(html)?))
    }

    /// Render the document to DOM nodes, page wrappers included
    pub fn to_dom(&self) -> Vec<DomNode> {
        self.content().iter().map(node_to_dom).collect()
    }

    /// Serialize the document to HTML markup
    pub fn to_html(&self) -> String {
        to_html(&self.to_dom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PageAttrs;
    use crate::layout::{MarginConfig, Orientation, PaperSize};

    #[test]
    fn test_parse_html_tree() {
        let nodes = parse_html(r#"<div data-page class="page"><p>a &amp; b<br>c</p></div>"#).unwrap();
        assert_eq!(nodes.len(), 1);
        let page = nodes[0].as_element().unwrap();
        assert_eq!(page.attr("data-page"), Some(""));
        assert_eq!(page.attr("class"), Some("page"));
        let p = page.children[0].as_element().unwrap();
        assert_eq!(p.children.len(), 3);
        assert_eq!(p.children[0], DomNode::Text("a & b".into()));
    }

    #[test]
    fn test_nested_page_only_outer_is_page() {
        let doc = Document::from_html(
            r#"<div data-page><div data-page><p>inner</p></div><p>after</p></div>"#,
        )
        .unwrap();
        assert_eq!(doc.page_count(), 1);
        let page = &doc.content()[0];
        assert_eq!(page.content().len(), 2);
        assert!(page.content().iter().all(|n| !n.is_page()));
        assert_eq!(page.content()[0].text_content(), "inner");
    }

    #[test]
    fn test_page_below_wrapper_is_not_nested() {
        let doc = Document::from_html(
            r#"<div data-page><div class="wrap"><div data-page><p>inner</p></div></div></div>"#,
        )
        .unwrap();
        assert_eq!(doc.page_count(), 1);
        let page = &doc.content()[0];
        assert_eq!(page.content().len(), 1);
        assert_eq!(page.content()[0].type_name(), "paragraph");
        assert_eq!(page.content()[0].text_content(), "inner");

        // Wrappers outside any page do not hide a page
        let doc = Document::from_html(r#"<section><div data-page><p>x</p></div></section>"#).unwrap();
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_html_entities_decode() {
        let doc = Document::from_html(r#"<div data-page><p>a&nbsp;b &mdash; c&#33;</p></div>"#)
            .unwrap();
        assert_eq!(doc.content()[0].text_content(), "a\u{a0}b \u{2014} c!");

        let nodes = parse_html(r#"<div title="x&nbsp;y">&copy;</div>"#).unwrap();
        let el = nodes[0].as_element().unwrap();
        assert_eq!(el.attr("title"), Some("x\u{a0}y"));
        assert_eq!(el.children[0], DomNode::Text("\u{a9}".into()));
    }

    #[test]
    fn test_undecodable_entities_kept_as_written() {
        let doc = Document::from_html("<div data-page><p>fish & chips &bogus;</p></div>").unwrap();
        assert_eq!(doc.content()[0].text_content(), "fish & chips &bogus;");
    }

    #[test]
    fn test_page_recognition_rule() {
        let mut outer = DomElement::new("div");
        outer.set_attr("data-page", "");
        let inner = outer.clone();
        assert!(is_page_element(&outer, None));
        assert!(!is_page_element(&inner, Some(&outer)));
        assert!(!is_page_element(&DomElement::new("div"), None));
    }

    #[test]
    fn test_stray_inline_is_wrapped() {
        let doc = Document::from_html("<div data-page>loose <b>text</b><h2>Title</h2>\n</div>").unwrap();
        let page = &doc.content()[0];
        assert_eq!(page.content().len(), 2);
        assert_eq!(page.content()[0].type_name(), "paragraph");
        assert_eq!(page.content()[0].text_content(), "loose text");
        assert_eq!(page.content()[1].kind(), &NodeKind::Heading { level: 2 });
    }

    #[test]
    fn test_document_round_trip() {
        let doc = Document::from_nodes(vec![
            Node::page(
                PageAttrs::default()
                    .with_paper_size(PaperSize::Legal)
                    .with_orientation(Orientation::Landscape)
                    .with_margins(MarginConfig::new(1.0, 2.0, 3.0, 4.0)),
                vec![Node::paragraph(vec![Node::text("x < \"y\""), Node::hard_break()])],
            ),
            Node::page(PageAttrs::default().with_paper_colour("#eee"), vec![
                Node::heading(1, vec![Node::text("T")]),
            ]),
        ]);

        let html = doc.to_html();
        assert!(html.starts_with(r#"<div data-page="true" class="page" data-paper-size="Legal""#));
        assert_eq!(Document::from_html(&html).unwrap(), doc);
    }

    #[test]
    fn test_unclosed_elements_are_closed() {
        let doc = Document::from_html("<div data-page><p>one<p>two</div>").unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.content()[0].text_content(), "onetwo");
    }
}
