//! Projection of a documentation tree into indexable search documents.

use std::collections::HashSet;

use doctree_tree::{ButtonAction, DocNode, DocsTree};
use pulldown_cmark::{Event, Parser};
use serde::{Deserialize, Serialize};

/// One indexable page, projected from a [`doctree_tree::PageNode`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchDocument {
    /// Page node id; the index is keyed by it.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Page body flattened to plain text.
    pub content: String,
    /// Version the page belongs to.
    pub version: String,
    /// Extension-less page path.
    pub path: String,
    /// Page language, if tagged.
    pub language: Option<String>,
}

/// Extract the indexable documents from a built tree.
///
/// Hidden nodes are skipped along with their whole subtree. A page is skipped
/// when its own `searchable` flag is off or when a page-target button anywhere
/// in the tree names its path with `searchable: false`. Containers are
/// traversed but never indexed; link buttons neither index nor block.
#[must_use]
pub fn extract_documents(tree: &DocsTree) -> Vec<SearchDocument> {
    // Blocking buttons take effect even from hidden subtrees, so the blocked
    // set is collected over the whole tree before visibility pruning.
    let mut blocked: HashSet<&str> = HashSet::new();
    for version in tree {
        collect_blocked(&version.children, &mut blocked);
    }

    let mut documents = Vec::new();
    for version in tree {
        extract_nodes(&version.children, &version.version, &blocked, &mut documents);
    }
    documents
}

fn collect_blocked<'a>(nodes: &'a [DocNode], blocked: &mut HashSet<&'a str>) {
    for node in nodes {
        match node {
            DocNode::Button(button) => {
                if !button.searchable
                    && let ButtonAction::Page {
                        page_path: Some(path),
                        ..
                    } = &button.action
                {
                    blocked.insert(path);
                }
            }
            DocNode::Dropdown(d) => collect_blocked(&d.children, blocked),
            DocNode::Group(g) => collect_blocked(&g.children, blocked),
            DocNode::Page(_) => {}
        }
    }
}

fn extract_nodes(
    nodes: &[DocNode],
    version: &str,
    blocked: &HashSet<&str>,
    out: &mut Vec<SearchDocument>,
) {
    for node in nodes {
        if node.hidden() {
            continue;
        }
        match node {
            DocNode::Page(page) => {
                if !page.searchable || blocked.contains(page.path.as_str()) {
                    continue;
                }
                out.push(SearchDocument {
                    id: page.id.clone(),
                    title: page.title.clone(),
                    content: flatten_markdown(&page.content),
                    version: version.to_owned(),
                    path: page.path.clone(),
                    language: page.language.clone(),
                });
            }
            DocNode::Dropdown(d) => extract_nodes(&d.children, version, blocked, out),
            DocNode::Group(g) => extract_nodes(&g.children, version, blocked, out),
            DocNode::Button(_) => {}
        }
    }
}

/// Flatten markdown to whitespace-separated plain text for indexing.
#[must_use]
pub fn flatten_markdown(markdown: &str) -> String {
    let mut text = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => {
                if !text.is_empty() && !text.ends_with(' ') {
                    text.push(' ');
                }
                text.push_str(t.trim());
            }
            Event::SoftBreak | Event::HardBreak => {
                if !text.ends_with(' ') {
                    text.push(' ');
                }
            }
            _ => {}
        }
    }
    text.trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use doctree_tree::build_tree;
    use pretty_assertions::assert_eq;

    use super::*;

    fn tree_from(entries: &[(&str, &str)]) -> DocsTree {
        let files: BTreeMap<String, String> = entries
            .iter()
            .map(|(p, c)| ((*p).to_owned(), (*c).to_owned()))
            .collect();
        build_tree(&files)
    }

    fn paths(docs: &[SearchDocument]) -> Vec<&str> {
        docs.iter().map(|d| d.path.as_str()).collect()
    }

    #[test]
    fn test_extracts_visible_pages() {
        let tree = tree_from(&[
            ("docs/1.0.0/intro.md", "---\ntitle: Intro\n---\n# Hello\nWorld"),
            ("docs/1.0.0/api/auth.md", "Tokens"),
        ]);

        let docs = extract_documents(&tree);
        // Sibling sort is by (order, title); "Intro" precedes "api" lexically.
        assert_eq!(
            paths(&docs),
            vec!["docs/1.0.0/intro", "docs/1.0.0/api/auth"]
        );
        let intro = docs.iter().find(|d| d.title == "Intro").unwrap();
        assert_eq!(intro.content, "Hello World");
        assert_eq!(intro.version, "1.0.0");
    }

    #[test]
    fn test_hidden_page_excluded() {
        let tree = tree_from(&[("docs/1.0.0/secret.md", "---\nhidden: true\n---\nShh")]);
        assert_eq!(extract_documents(&tree), Vec::new());
    }

    #[test]
    fn test_hidden_container_prunes_subtree() {
        let tree = tree_from(&[
            ("docs/1.0.0/api/auth.md", "Tokens"),
            ("docs/1.0.0/api/dropdown-settings.md", "---\nhidden: true\n---\n"),
            ("docs/1.0.0/intro.md", "Hello"),
        ]);

        assert_eq!(paths(&extract_documents(&tree)), vec!["docs/1.0.0/intro"]);
    }

    #[test]
    fn test_unsearchable_page_excluded() {
        let tree = tree_from(&[(
            "docs/1.0.0/internal.md",
            "---\nsearchable: false\n---\nInternal",
        )]);
        assert_eq!(extract_documents(&tree), Vec::new());
    }

    #[test]
    fn test_blocking_button_excludes_target_page() {
        let tree = tree_from(&[
            ("docs/1.0.0/guide.md", "Guide"),
            (
                "docs/1.0.0/nav/link.button.md",
                "---\nvariant: page\npagePath: docs/1.0.0/guide\nsearchable: false\n---\n",
            ),
        ]);

        assert_eq!(extract_documents(&tree), Vec::new());
    }

    #[test]
    fn test_link_button_never_blocks() {
        let tree = tree_from(&[
            ("docs/1.0.0/guide.md", "Guide"),
            (
                "docs/1.0.0/site.button.md",
                "---\nurl: https://example.com\nsearchable: false\n---\n",
            ),
        ]);

        assert_eq!(paths(&extract_documents(&tree)), vec!["docs/1.0.0/guide"]);
    }

    #[test]
    fn test_language_carried_into_document() {
        let tree = tree_from(&[("docs/1.0.0/ru/intro.md", "Привет")]);

        let docs = extract_documents(&tree);
        assert_eq!(docs[0].language.as_deref(), Some("ru"));
    }

    #[test]
    fn test_flatten_markdown_strips_formatting() {
        assert_eq!(
            flatten_markdown("# Title\n\nSome **bold** and `code`.\n\n- item one\n- item two"),
            "Title Some bold and code . item one item two"
        );
    }

    #[test]
    fn test_flatten_markdown_empty() {
        assert_eq!(flatten_markdown(""), "");
    }
}
