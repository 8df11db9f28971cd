//! Page attribute setters.
//!
//! Every setter follows the same contract: without a dispatch callback it
//! is a dry run and returns `false`; invalid input or a value that is
//! already set returns `false` with a warning; a node that is not a page
//! returns `false` with an error. Otherwise the change is written into the
//! transaction, dispatched, and `true` is returned. A call either applies
//! its whole change or leaves the transaction untouched.
//!
//! "Already set" compares against the value stored on the node, not the
//! resolved one. An unset attribute differs from every explicit value,
//! including the session default, so setting the default on an unset page
//! dispatches and pins the page to that value.

use crate::document::Node;
use crate::editing::{PageAttribute, Transaction};
use crate::error::{PageError, Result};
use crate::layout::{MarginConfig, Orientation, PaperSize};
use crate::schema::is_valid_colour;
use smallvec::SmallVec;

/// Callback that hands a finished transaction to the host; `None` for a dry run
pub type Dispatch<'a> = Option<&'a mut dyn FnMut(&Transaction)>;

fn paper_size_value(new_size: &str) -> Result<PageAttribute> {
    let size: PaperSize = new_size.parse()?;
    Ok(PageAttribute::PaperSize(Some(size)))
}

fn paper_colour_value(new_colour: &str) -> Result<PageAttribute> {
    if !is_valid_colour(new_colour) {
        return Err(PageError::InvalidColour(new_colour.to_string()));
    }
    Ok(PageAttribute::PaperColour(Some(new_colour.trim().to_string())))
}

fn page_margins_value(margins: MarginConfig) -> Result<PageAttribute> {
    margins.validate()?;
    Ok(PageAttribute::PageMargins(Some(margins)))
}

fn set_attribute_on_node(
    tr: &mut Transaction,
    dispatch: Dispatch<'_>,
    page_pos: usize,
    node: &Node,
    value: Result<PageAttribute>,
) -> bool {
    let Some(dispatch) = dispatch else {
        return false;
    };

    let attr = match value {
        Ok(attr) => attr,
        Err(err) => {
            log::warn!("{}", err);
            return false;
        }
    };

    let Some(attrs) = node.page_attrs() else {
        log::error!(
            "{}",
            PageError::NotAPageNode {
                pos: page_pos,
                found: node.type_name(),
            }
        );
        return false;
    };

    if attr.is_set_on(attrs) {
        log::warn!(
            "Page at position {} already has {} set to {:?}",
            page_pos,
            attr.name(),
            attr
        );
        return false;
    }

    if let Err(err) = tr.set_node_attribute(page_pos, attr) {
        log::error!("Position {} does not match the given page node: {}", page_pos, err);
        return false;
    }

    dispatch(tr);
    true
}

fn set_attribute_on_all_pages(
    tr: &mut Transaction,
    dispatch: Dispatch<'_>,
    value: Result<PageAttribute>,
) -> bool {
    let Some(dispatch) = dispatch else {
        return false;
    };

    let attr = match value {
        Ok(attr) => attr,
        Err(err) => {
            log::warn!("{}", err);
            return false;
        }
    };

    let targets: SmallVec<[usize; 8]> = tr
        .doc()
        .pages()
        .filter(|page| !page.node.page_attrs().is_some_and(|attrs| attr.is_set_on(attrs)))
        .map(|page| page.pos)
        .collect();

    if targets.is_empty() {
        log::warn!("Every page already has {} set to {:?}", attr.name(), attr);
        return false;
    }

    let mut next = tr.clone();
    for pos in targets {
        if let Err(err) = next.set_node_attribute(pos, attr.clone()) {
            log::error!("Failed to set {} on page at {}: {}", attr.name(), pos, err);
            return false;
        }
    }
    *tr = next;

    dispatch(tr);
    true
}

/// Set the paper size of the page at `page_pos`
pub fn set_paper_size(
    tr: &mut Transaction,
    dispatch: Dispatch<'_>,
    page_pos: usize,
    new_size: &str,
) -> bool {
    let Some(node) = tr.doc().node_at(page_pos).map(Node::shallow) else {
        log::error!("{}", PageError::NoNodeAtPosition(page_pos));
        return false;
    };
    set_paper_size_on_node(tr, dispatch, page_pos, &node, new_size)
}

/// Set the paper size of `node`, the page at `page_pos`
pub fn set_paper_size_on_node(
    tr: &mut Transaction,
    dispatch: Dispatch<'_>,
    page_pos: usize,
    node: &Node,
    new_size: &str,
) -> bool {
    set_attribute_on_node(tr, dispatch, page_pos, node, paper_size_value(new_size))
}

/// Set the paper colour of `node`, the page at `page_pos`
pub fn set_paper_colour_on_node(
    tr: &mut Transaction,
    dispatch: Dispatch<'_>,
    page_pos: usize,
    node: &Node,
    new_colour: &str,
) -> bool {
    set_attribute_on_node(tr, dispatch, page_pos, node, paper_colour_value(new_colour))
}

pub fn set_paper_orientation_on_node(
    tr: &mut Transaction,
    dispatch: Dispatch<'_>,
    page_pos: usize,
    node: &Node,
    orientation: Orientation,
) -> bool {
    let value = Ok(PageAttribute::PaperOrientation(Some(orientation)));
    set_attribute_on_node(tr, dispatch, page_pos, node, value)
}

pub fn set_page_margins_on_node(
    tr: &mut Transaction,
    dispatch: Dispatch<'_>,
    page_pos: usize,
    node: &Node,
    margins: MarginConfig,
) -> bool {
    set_attribute_on_node(tr, dispatch, page_pos, node, page_margins_value(margins))
}

/// Set the paper size of every page in one transaction
pub fn set_document_paper_size(tr: &mut Transaction, dispatch: Dispatch<'_>, new_size: &str) -> bool {
    set_attribute_on_all_pages(tr, dispatch, paper_size_value(new_size))
}

pub fn set_document_paper_colour(
    tr: &mut Transaction,
    dispatch: Dispatch<'_>,
    new_colour: &str,
) -> bool {
    set_attribute_on_all_pages(tr, dispatch, paper_colour_value(new_colour))
}

pub fn set_document_paper_orientation(
    tr: &mut Transaction,
    dispatch: Dispatch<'_>,
    orientation: Orientation,
) -> bool {
    let value = Ok(PageAttribute::PaperOrientation(Some(orientation)));
    set_attribute_on_all_pages(tr, dispatch, value)
}

pub fn set_document_page_margins(
    tr: &mut Transaction,
    dispatch: Dispatch<'_>,
    margins: MarginConfig,
) -> bool {
    set_attribute_on_all_pages(tr, dispatch, page_margins_value(margins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, PageAttrs};
    use crate::editing::EditorState;
    use crate::test_log::{capture, diagnostics};
    use log::Level;

    fn state() -> EditorState {
        EditorState::new(Document::from_nodes(vec![
            Node::page(PageAttrs::default(), vec![Node::paragraph(vec![Node::text("a")])]),
            Node::page(
                PageAttrs::default().with_paper_size(PaperSize::A5),
                vec![Node::paragraph(vec![])],
            ),
        ]))
    }

    fn page_node(tr: &Transaction, pos: usize) -> Node {
        tr.doc().node_at(pos).map(Node::shallow).unwrap()
    }

    #[test]
    fn test_set_paper_size_dispatches_once() {
        let state = state();
        let mut tr = state.tr();
        let mut dispatched = 0;
        let mut count = |_: &Transaction| dispatched += 1;

        let node = page_node(&tr, 0);
        assert!(set_paper_size_on_node(&mut tr, Some(&mut count), 0, &node, "A3"));
        assert_eq!(tr.steps().len(), 1);

        let node = page_node(&tr, 0);
        let (applied, records) =
            capture(|| set_paper_size_on_node(&mut tr, Some(&mut count), 0, &node, "A3"));
        assert!(!applied);
        assert_eq!(tr.steps().len(), 1);
        assert_eq!(diagnostics(&records)[0].0, Level::Warn);

        assert_eq!(dispatched, 1);
        let next = state.apply(&tr);
        assert_eq!(
            next.doc().content()[0].page_attrs().unwrap().paper_size,
            Some(PaperSize::A3)
        );
    }

    #[test]
    fn test_dry_run_never_mutates() {
        let state = state();
        let mut tr = state.tr();
        let node = page_node(&tr, 0);
        assert!(!set_paper_size_on_node(&mut tr, None, 0, &node, "A3"));
        assert!(!set_paper_colour_on_node(&mut tr, None, 0, &node, "red"));
        assert!(!tr.doc_changed());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let state = state();
        let mut tr = state.tr();
        let mut dispatched = false;
        let mut mark = |_: &Transaction| dispatched = true;
        let node = page_node(&tr, 0);

        let (applied, records) =
            capture(|| set_paper_size_on_node(&mut tr, Some(&mut mark), 0, &node, "A42"));
        assert!(!applied);
        assert_eq!(diagnostics(&records)[0].0, Level::Warn);

        let (applied, records) =
            capture(|| set_paper_colour_on_node(&mut tr, Some(&mut mark), 0, &node, "#12"));
        assert!(!applied);
        assert_eq!(diagnostics(&records)[0].0, Level::Warn);

        assert!(!set_page_margins_on_node(
            &mut tr,
            Some(&mut mark),
            0,
            &node,
            MarginConfig::all(-1.0)
        ));

        assert!(!tr.doc_changed());
        assert!(!dispatched);
    }

    #[test]
    fn test_non_page_node_is_an_error() {
        let state = state();
        let mut tr = state.tr();
        let mut noop = |_: &Transaction| {};
        let paragraph = page_node(&tr, 1);
        assert_eq!(paragraph.type_name(), "paragraph");

        let (applied, records) = capture(|| {
            set_paper_colour_on_node(&mut tr, Some(&mut noop), 1, &paragraph, "#eee")
        });
        assert!(!applied);
        assert_eq!(diagnostics(&records)[0].0, Level::Error);
        assert!(!tr.doc_changed());
    }

    #[test]
    fn test_position_node_mismatch_is_an_error() {
        let state = state();
        let mut tr = state.tr();
        let mut noop = |_: &Transaction| {};
        let page = page_node(&tr, 0);

        // A page node paired with the position of a paragraph
        let (applied, records) =
            capture(|| set_paper_size_on_node(&mut tr, Some(&mut noop), 1, &page, "B5"));
        assert!(!applied);
        assert_eq!(diagnostics(&records)[0].0, Level::Error);
        assert!(!tr.doc_changed());
    }

    #[test]
    fn test_set_paper_size_by_position() {
        let state = state();
        let mut tr = state.tr();
        let mut noop = |_: &Transaction| {};
        let second_page = state.doc().page_pos(1).unwrap();

        assert!(set_paper_size(&mut tr, Some(&mut noop), second_page, "Letter"));
        assert_eq!(
            tr.doc().page(1).unwrap().node.page_attrs().unwrap().paper_size,
            Some(PaperSize::Letter)
        );

        let (applied, records) = capture(|| set_paper_size(&mut tr, Some(&mut noop), 500, "A4"));
        assert!(!applied);
        assert_eq!(diagnostics(&records)[0].0, Level::Error);
    }

    #[test]
    fn test_set_paper_size_on_paragraph_position() {
        let state = state();
        let mut tr = state.tr();
        let mut dispatched = 0;
        let mut count = |_: &Transaction| dispatched += 1;
        // First child of the first page
        let paragraph = 1;
        assert_eq!(tr.doc().node_at(paragraph).unwrap().type_name(), "paragraph");

        let (applied, records) =
            capture(|| set_paper_size(&mut tr, Some(&mut count), paragraph, "Letter"));
        assert!(!applied);
        let found = diagnostics(&records);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, Level::Error);
        assert!(!tr.doc_changed());
        assert!(tr.steps().is_empty());
        assert_eq!(dispatched, 0);
    }

    #[test]
    fn test_explicit_default_pins_unset_page() {
        let state = state();
        let mut tr = state.tr();
        let mut noop = |_: &Transaction| {};
        let node = page_node(&tr, 0);
        assert_eq!(node.page_attrs().unwrap().paper_size, None);

        assert!(set_paper_size_on_node(&mut tr, Some(&mut noop), 0, &node, "A4"));
        assert_eq!(
            tr.doc().content()[0].page_attrs().unwrap().paper_size,
            Some(PaperSize::A4)
        );

        let node = page_node(&tr, 0);
        let (applied, _) =
            capture(|| set_paper_size_on_node(&mut tr, Some(&mut noop), 0, &node, "A4"));
        assert!(!applied);
    }

    #[test]
    fn test_orientation_and_colour() {
        let state = state();
        let mut tr = state.tr();
        let mut noop = |_: &Transaction| {};
        let node = page_node(&tr, 0);

        assert!(set_paper_orientation_on_node(
            &mut tr,
            Some(&mut noop),
            0,
            &node,
            Orientation::Landscape
        ));
        assert!(set_paper_colour_on_node(&mut tr, Some(&mut noop), 0, &node, " #fafafa "));
        let attrs = tr.doc().content()[0].page_attrs().unwrap().clone();
        assert_eq!(attrs.paper_orientation, Some(Orientation::Landscape));
        assert_eq!(attrs.paper_colour.as_deref(), Some("#fafafa"));
    }

    #[test]
    fn test_document_wide_setters() {
        let state = state();
        let mut tr = state.tr();
        let mut dispatched = 0;
        let mut count = |_: &Transaction| dispatched += 1;

        assert!(set_document_paper_size(&mut tr, Some(&mut count), "A5"));
        // Only the first page needed a change
        assert_eq!(tr.steps().len(), 1);
        assert!(!set_document_paper_size(&mut tr, Some(&mut count), "A5"));
        assert!(!set_document_paper_colour(&mut tr, Some(&mut count), "nope"));
        assert!(set_document_page_margins(&mut tr, Some(&mut count), MarginConfig::all(3.0)));
        assert!(set_document_paper_orientation(
            &mut tr,
            Some(&mut count),
            Orientation::Landscape
        ));
        assert_eq!(dispatched, 3);
        assert_eq!(tr.steps().len(), 5);
        assert!(tr
            .doc()
            .pages()
            .all(|p| p.node.page_attrs().unwrap().paper_size == Some(PaperSize::A5)));
    }
}
