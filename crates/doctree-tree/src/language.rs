//! Language folder handling and language-scoped tree views.
//!
//! A path segment matching one of the recognized short codes is never
//! materialized as a tree node; it only tags the pages beneath it. A page
//! without a language is common to every language view.

use crate::node::{DocNode, DocsTree};

/// Recognized language folder codes.
pub const LANGUAGE_CODES: [&str; 8] = ["en", "ru", "es", "fr", "de", "zh", "ja", "ko"];

/// Whether a path segment is a recognized language folder.
#[must_use]
pub fn is_language_segment(segment: &str) -> bool {
    LANGUAGE_CODES
        .iter()
        .any(|code| segment.eq_ignore_ascii_case(code))
}

/// Collect the distinct page languages present in a tree, sorted.
#[must_use]
pub fn collect_languages(tree: &DocsTree) -> Vec<String> {
    fn walk(nodes: &[DocNode], out: &mut Vec<String>) {
        for node in nodes {
            match node {
                DocNode::Page(page) => {
                    if let Some(lang) = &page.language
                        && !out.contains(lang)
                    {
                        out.push(lang.clone());
                    }
                }
                DocNode::Dropdown(d) => walk(&d.children, out),
                DocNode::Group(g) => walk(&g.children, out),
                DocNode::Button(_) => {}
            }
        }
    }

    let mut languages = Vec::new();
    for version in tree {
        walk(&version.children, &mut languages);
    }
    languages.sort();
    languages
}

/// Produce a language-scoped copy of the tree.
///
/// Pages tagged with a different language are dropped; untagged pages are kept
/// under every language. Containers and buttons are kept as-is (a container
/// may end up empty; hiding empty containers is a presentation decision).
#[must_use]
pub fn filter_by_language(tree: &DocsTree, language: &str) -> DocsTree {
    fn filter_nodes(nodes: &[DocNode], language: &str) -> Vec<DocNode> {
        nodes
            .iter()
            .filter_map(|node| match node {
                DocNode::Page(page) => match &page.language {
                    Some(lang) if !lang.eq_ignore_ascii_case(language) => None,
                    _ => Some(node.clone()),
                },
                DocNode::Dropdown(d) => {
                    let mut d = d.clone();
                    d.children = filter_nodes(&d.children, language);
                    Some(DocNode::Dropdown(d))
                }
                DocNode::Group(g) => {
                    let mut g = g.clone();
                    g.children = filter_nodes(&g.children, language);
                    Some(DocNode::Group(g))
                }
                DocNode::Button(_) => Some(node.clone()),
            })
            .collect()
    }

    tree.iter()
        .map(|version| {
            let mut version = version.clone();
            version.children = filter_nodes(&version.children, language);
            version
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{DropdownMode, DropdownNode, PageNode, VersionNode};

    fn page(path: &str, language: Option<&str>) -> DocNode {
        DocNode::Page(PageNode {
            id: crate::node::node_id(path),
            title: path.to_owned(),
            order: 0,
            icon: None,
            hidden: false,
            path: path.to_owned(),
            file_path: format!("{path}.md"),
            language: language.map(str::to_owned),
            tags: None,
            content: String::new(),
            searchable: true,
        })
    }

    fn tree_with(children: Vec<DocNode>) -> DocsTree {
        vec![VersionNode {
            version: "1.0.0".to_owned(),
            path: "docs/1.0.0".to_owned(),
            children,
        }]
    }

    #[test]
    fn test_is_language_segment() {
        assert!(is_language_segment("en"));
        assert!(is_language_segment("RU"));
        assert!(!is_language_segment("api"));
        assert!(!is_language_segment("eng"));
    }

    #[test]
    fn test_collect_languages_distinct_sorted() {
        let tree = tree_with(vec![
            page("a", Some("ru")),
            page("b", Some("en")),
            page("c", Some("ru")),
            page("d", None),
        ]);

        assert_eq!(collect_languages(&tree), vec!["en", "ru"]);
    }

    #[test]
    fn test_filter_keeps_untagged_pages() {
        let tree = tree_with(vec![page("a", None), page("b", Some("ru"))]);

        let en = filter_by_language(&tree, "en");
        assert_eq!(en[0].children.len(), 1);
        assert_eq!(en[0].children[0].title(), "a");

        let ru = filter_by_language(&tree, "ru");
        assert_eq!(ru[0].children.len(), 2);
    }

    #[test]
    fn test_filter_recurses_into_containers() {
        let dropdown = DocNode::Dropdown(DropdownNode {
            id: "api".to_owned(),
            title: "api".to_owned(),
            order: 0,
            icon: None,
            hidden: false,
            path: "api".to_owned(),
            mode: DropdownMode::Collapsible,
            searchable: None,
            children: vec![page("api/a", Some("en")), page("api/b", Some("ru"))],
        });
        let tree = tree_with(vec![dropdown]);

        let en = filter_by_language(&tree, "en");
        let DocNode::Dropdown(d) = &en[0].children[0] else {
            panic!("expected dropdown");
        };
        assert_eq!(d.children.len(), 1);
        assert_eq!(d.children[0].title(), "api/a");
    }
}
