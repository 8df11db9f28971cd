//! Page indexing over the document tree

use super::{Document, Node};

/// A page node located in the document
#[derive(Debug, Clone, Copy)]
pub struct PageRef<'a> {
    /// Page number in document order (0-based)
    pub index: usize,
    /// Position directly before the page node
    pub pos: usize,
    pub node: &'a Node,
}

impl<'a> PageRef<'a> {
    /// Position range covered by the page, including its boundary tokens
    pub fn range(&self) -> std::ops::Range<usize> {
        self.pos..self.pos + self.node.node_size()
    }
}

impl Document {
    /// Page nodes in document order.
    ///
    /// Pages never nest, so only top-level nodes are inspected.
    pub fn pages(&self) -> impl Iterator<Item = PageRef<'_>> + '_ {
        self.top_level()
            .filter(|(_, node)| node.is_page())
            .enumerate()
            .map(|(index, (pos, node))| PageRef { index, pos, node })
    }

    /// Whether the document contains any page node
    pub fn has_pages(&self) -> bool {
        self.content().iter().any(Node::is_page)
    }

    pub fn page_count(&self) -> usize {
        self.content().iter().filter(|node| node.is_page()).count()
    }

    /// Number of the last page, `None` for a page-less document
    pub fn last_page_num(&self) -> Option<usize> {
        self.page_count().checked_sub(1)
    }

    pub fn is_page_num_in_range(&self, page_num: usize) -> bool {
        self.last_page_num().is_some_and(|last| page_num <= last)
    }

    /// The page with the given number
    pub fn page(&self, page_num: usize) -> Option<PageRef<'_>> {
        self.pages().nth(page_num)
    }

    /// Position of the page with the given number
    pub fn page_pos(&self, page_num: usize) -> Option<usize> {
        self.page(page_num).map(|page| page.pos)
    }

    /// Number of the page a document position belongs to
    pub fn page_num_at(&self, pos: usize) -> Option<usize> {
        self.pages()
            .find(|page| page.range().contains(&pos))
            .map(|page| page.index)
    }
}
