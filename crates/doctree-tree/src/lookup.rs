//! Page lookup and button target resolution over a built tree.

use crate::node::{ButtonAction, ButtonNode, DocNode, DocsTree, PageNode};

fn walk_pages<'a>(
    nodes: &'a [DocNode],
    pred: &dyn Fn(&PageNode) -> bool,
) -> Option<&'a PageNode> {
    for node in nodes {
        match node {
            DocNode::Page(page) if pred(page) => return Some(page),
            DocNode::Page(_) | DocNode::Button(_) => {}
            DocNode::Dropdown(d) => {
                if let Some(found) = walk_pages(&d.children, pred) {
                    return Some(found);
                }
            }
            DocNode::Group(g) => {
                if let Some(found) = walk_pages(&g.children, pred) {
                    return Some(found);
                }
            }
        }
    }
    None
}

/// Find a page by its extension-less path.
#[must_use]
pub fn find_page<'a>(tree: &'a DocsTree, path: &str) -> Option<&'a PageNode> {
    tree.iter()
        .find_map(|version| walk_pages(&version.children, &|page| page.path == path))
}

/// Find a page by its node id.
#[must_use]
pub fn find_page_by_id<'a>(tree: &'a DocsTree, id: &str) -> Option<&'a PageNode> {
    tree.iter()
        .find_map(|version| walk_pages(&version.children, &|page| page.id == id))
}

/// Resolve a page-variant button to its target page.
///
/// Returns `None` for link buttons, for page buttons without a target, and
/// when the target path matches no page in the tree.
#[must_use]
pub fn resolve_button<'a>(tree: &'a DocsTree, button: &ButtonNode) -> Option<&'a PageNode> {
    match &button.action {
        ButtonAction::Page {
            page_path: Some(path),
            ..
        } => find_page(tree, path),
        ButtonAction::Page { page_path: None, .. } | ButtonAction::Link { .. } => None,
    }
}
