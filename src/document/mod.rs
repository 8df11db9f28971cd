//! Document model: a tree of page containers and block nodes

mod node;
mod traversal;

pub use node::{Node, NodeKind, PageAttrs};
pub use traversal::PageRef;

/// The document root.
///
/// Positions follow the structured-document convention: position 0 is
/// before the first top-level node, a text node spans one position per
/// character and a container spans its content plus an opening and a
/// closing token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    content: Vec<Node>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from top-level nodes
    pub fn from_nodes(content: Vec<Node>) -> Self {
        Self { content }
    }

    pub fn content(&self) -> &[Node] {
        &self.content
    }

    /// Total size of the document content in positions
    pub fn content_size(&self) -> usize {
        self.content.iter().map(Node::node_size).sum()
    }

    /// Top-level nodes paired with their start positions
    pub fn top_level(&self) -> impl Iterator<Item = (usize, &Node)> + '_ {
        self.content.iter().scan(0usize, |pos, node| {
            let start = *pos;
            *pos += node.node_size();
            Some((start, node))
        })
    }

    /// The node starting at or containing `pos`, descending into containers.
    ///
    /// Returns the node directly after `pos` when `pos` sits at a node
    /// boundary, or the text node covering `pos`.
    pub fn node_at(&self, pos: usize) -> Option<&Node> {
        node_in(&self.content, pos)
    }

    /// Mutable variant of [`Document::node_at`]
    pub fn node_at_mut(&mut self, pos: usize) -> Option<&mut Node> {
        node_in_mut(&mut self.content, pos)
    }

    /// Top-level nodes overlapping `from..to`, for copying.
    ///
    /// Page nodes are cut down to the blocks that overlap the range; other
    /// blocks are copied whole.
    pub fn cut(&self, from: usize, to: usize) -> Vec<Node> {
        let (from, to) = (from.min(to), from.max(to));
        let mut out = Vec::new();

        for (start, node) in self.top_level() {
            let end = start + node.node_size();
            if end <= from || start >= to {
                continue;
            }

            if !node.is_page() {
                out.push(node.clone());
                continue;
            }

            let mut page = node.shallow();
            let mut child_pos = start + 1;
            for child in node.content() {
                let child_end = child_pos + child.node_size();
                if child_end > from && child_pos < to {
                    page.content_mut().push(child.clone());
                }
                child_pos = child_end;
            }
            out.push(page);
        }

        out
    }
}

fn node_in(nodes: &[Node], pos: usize) -> Option<&Node> {
    let mut offset = 0;
    for node in nodes {
        let end = offset + node.node_size();
        if pos == offset {
            return Some(node);
        }
        if pos < end {
            if node.is_text() {
                return Some(node);
            }
            if node.is_leaf() {
                return None;
            }
            return node_in(node.content(), pos - offset - 1);
        }
        offset = end;
    }
    None
}

fn node_in_mut(nodes: &mut [Node], pos: usize) -> Option<&mut Node> {
    let mut offset = 0;
    for node in nodes.iter_mut() {
        let end = offset + node.node_size();
        if pos == offset {
            return Some(node);
        }
        if pos < end {
            if node.is_text() {
                return Some(node);
            }
            if node.is_leaf() {
                return None;
            }
            return node_in_mut(node.content_mut(), pos - offset - 1);
        }
        offset = end;
    }
    None
}
