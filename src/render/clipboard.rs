//! Clipboard serialization that drops page wrappers

use crate::document::{Document, Node};
use crate::schema::{node_to_dom, to_html, DomNode};

/// Serializes document fragments to DOM nodes
pub trait FragmentSerializer {
    fn serialize_node(&self, node: &Node, out: &mut Vec<DomNode>);

    fn serialize_fragment(&self, fragment: &[Node], out: &mut Vec<DomNode>) {
        for node in fragment {
            self.serialize_node(node, out);
        }
    }

    /// Serialize a fragment straight to markup
    fn serialize_to_html(&self, fragment: &[Node]) -> String {
        let mut out = Vec::new();
        self.serialize_fragment(fragment, &mut out);
        to_html(&out)
    }
}

/// Renders every node as stored, page wrappers included
#[derive(Debug, Clone, Copy, Default)]
pub struct DomSerializer;

impl FragmentSerializer for DomSerializer {
    fn serialize_node(&self, node: &Node, out: &mut Vec<DomNode>) {
        out.push(node_to_dom(node));
    }
}

/// Wraps a base serializer, emitting the children of page nodes in place of the page
#[derive(Debug, Clone, Default)]
pub struct ClipboardSerializer<S = DomSerializer> {
    base: S,
}

impl<S: FragmentSerializer> ClipboardSerializer<S> {
    pub fn new(base: S) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &S {
        &self.base
    }
}

impl<S: FragmentSerializer> FragmentSerializer for ClipboardSerializer<S> {
    fn serialize_node(&self, node: &Node, out: &mut Vec<DomNode>) {
        if node.is_page() {
            self.serialize_fragment(node.content(), out);
        } else {
            self.base.serialize_node(node, out);
        }
    }
}

/// Clipboard export hook; in-editor rendering never goes through it
#[derive(Debug, Clone, Default)]
pub struct ClipboardPlugin<S = DomSerializer> {
    serializer: ClipboardSerializer<S>,
}

impl<S: FragmentSerializer> ClipboardPlugin<S> {
    pub fn new(base: S) -> Self {
        Self {
            serializer: ClipboardSerializer::new(base),
        }
    }

    pub fn clipboard_serializer(&self) -> &ClipboardSerializer<S> {
        &self.serializer
    }

    /// Markup for copying the blocks between `from` and `to`
    pub fn copy_html(&self, doc: &Document, from: usize, to: usize) -> String {
        self.serializer.serialize_to_html(&doc.cut(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PageAttrs;
    use crate::schema::DomElement;

    fn para(text: &str) -> Node {
        Node::paragraph(vec![Node::text(text)])
    }

    fn texts(nodes: &[DomNode]) -> Vec<String> {
        nodes
            .iter()
            .map(|node| match node {
                DomNode::Element(DomElement { children, .. }) => match children.first() {
                    Some(DomNode::Text(text)) => text.clone(),
                    _ => String::new(),
                },
                DomNode::Text(text) => text.clone(),
            })
            .collect()
    }

    #[test]
    fn test_page_children_replace_wrapper() {
        let fragment = vec![
            Node::page(PageAttrs::default(), vec![para("A"), para("B")]),
            para("C"),
        ];

        let mut out = Vec::new();
        ClipboardSerializer::new(DomSerializer).serialize_fragment(&fragment, &mut out);
        assert_eq!(texts(&out), vec!["A", "B", "C"]);
        assert!(out
            .iter()
            .filter_map(DomNode::as_element)
            .all(|el| !el.has_attr("data-page")));

        let html = ClipboardSerializer::<DomSerializer>::default().serialize_to_html(&fragment);
        assert_eq!(html, "<p>A</p><p>B</p><p>C</p>");
    }

    #[test]
    fn test_base_serializer_keeps_wrapper() {
        let fragment = vec![Node::page(PageAttrs::default(), vec![para("A")])];
        let html = DomSerializer.serialize_to_html(&fragment);
        assert_eq!(html, r#"<div data-page="true" class="page"><p>A</p></div>"#);
    }

    #[test]
    fn test_plugin_copies_range_without_pages() {
        let doc = Document::from_nodes(vec![
            Node::page(PageAttrs::default(), vec![para("one"), para("two")]),
            Node::page(PageAttrs::default(), vec![para("three")]),
        ]);
        let plugin = ClipboardPlugin::new(DomSerializer);
        // "two" starts at 6, "three" ends at 20
        assert_eq!(
            plugin.copy_html(&doc, 7, 15),
            "<p>two</p><p>three</p>"
        );
        assert_eq!(plugin.copy_html(&doc, 0, 0), "");
    }

    struct Upper;

    impl FragmentSerializer for Upper {
        fn serialize_node(&self, node: &Node, out: &mut Vec<DomNode>) {
            out.push(DomNode::Text(node.text_content().to_uppercase()));
        }
    }

    #[test]
    fn test_wraps_any_base() {
        let fragment = vec![Node::page(PageAttrs::default(), vec![para("a")]), para("b")];
        let html = ClipboardSerializer::new(Upper).serialize_to_html(&fragment);
        assert_eq!(html, "AB");
    }
}
