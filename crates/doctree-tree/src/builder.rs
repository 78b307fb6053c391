//! Tree construction from a scanned file set.
//!
//! Input is a `path -> raw markdown` map; output is a forest of version
//! subtrees. Construction is a pure transformation:
//!
//! 1. Parse every file (classification + frontmatter).
//! 2. Partition by detected version segment (fallback: first path segment).
//! 3. Per version, pull out settings files keyed by their language-stripped
//!    folder path, then recursively partition the rest into pages, buttons,
//!    dropdowns and groups.
//! 4. Sort every sibling list by `(order, title)` and versions newest-first.
//!
//! Malformed individual files degrade to defaults inside the frontmatter
//! layer; nothing here aborts the build.

use std::collections::{BTreeMap, HashMap};

use doctree_frontmatter::{ButtonVariant, FileKind, FrontMatter, ParsedDoc, parse_doc};

use crate::language::is_language_segment;
use crate::node::{
    ButtonAction, ButtonNode, DocNode, DocsTree, DropdownNode, GroupNode, PageNode, VersionNode,
    node_id,
};
use crate::version::{compare_versions, is_version_segment};

/// A parsed file with its position in the version subtree precomputed.
struct FileInfo {
    /// Original path as scanned.
    path: String,
    /// Version-relative segments with language folders removed; the last
    /// segment is the filename.
    route: Vec<String>,
    /// Language folder code found in the original path, if any.
    language: Option<String>,
    parsed: ParsedDoc,
}

/// Build the documentation tree from a scanned file set.
///
/// Files whose path carries no segments past the version root are silently
/// dropped (no version subtree claims them). Versions are ordered newest
/// first; every sibling list is ordered by `(order, title)`.
#[must_use]
pub fn build_tree(files: &BTreeMap<String, String>) -> DocsTree {
    let mut versions: BTreeMap<String, (String, Vec<FileInfo>)> = BTreeMap::new();

    for (path, raw) in files {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            continue;
        }

        // First semver-like segment wins; otherwise the first segment acts as
        // the version key (existing fallback behavior, kept as-is).
        let version_idx = segments
            .iter()
            .position(|s| is_version_segment(s))
            .unwrap_or(0);
        let version = segments[version_idx].to_owned();
        let version_path = segments[..=version_idx].join("/");

        let language = segments
            .iter()
            .find(|s| is_language_segment(s))
            .map(|s| s.to_lowercase());
        let route: Vec<String> = segments[version_idx + 1..]
            .iter()
            .filter(|s| !is_language_segment(s))
            .map(|s| (*s).to_owned())
            .collect();
        if route.is_empty() {
            tracing::debug!(path, "no content segments past version root, dropping");
            continue;
        }

        versions
            .entry(version)
            .or_insert_with(|| (version_path, Vec::new()))
            .1
            .push(FileInfo {
                path: path.clone(),
                route,
                language,
                parsed: parse_doc(path, raw),
            });
    }

    let mut tree: DocsTree = versions
        .into_iter()
        .map(|(version, (version_path, files))| build_version(version, version_path, files))
        .collect();
    tree.sort_by(|a, b| compare_versions(&a.version, &b.version));
    tree
}

/// Build one version subtree.
fn build_version(version: String, version_path: String, files: Vec<FileInfo>) -> VersionNode {
    // Settings are keyed by the version-relative, language-stripped folder
    // path, which is exactly how folders are addressed during recursion.
    let mut settings: HashMap<String, FrontMatter> = HashMap::new();
    let mut content: Vec<FileInfo> = Vec::new();

    for file in files {
        match file.parsed.kind {
            FileKind::DropdownSettings | FileKind::GroupSettings => {
                let folder = file.route[..file.route.len() - 1].join("/");
                settings.insert(folder, file.parsed.meta);
            }
            FileKind::Page | FileKind::Button => content.push(file),
        }
    }

    let refs: Vec<&FileInfo> = content.iter().collect();
    let children = build_level(&refs, 0, "", &settings, &version_path);

    VersionNode {
        version,
        path: version_path,
        children,
    }
}

/// Recursively build the nodes of one folder level.
fn build_level(
    files: &[&FileInfo],
    depth: usize,
    current_path: &str,
    settings: &HashMap<String, FrontMatter>,
    version_path: &str,
) -> Vec<DocNode> {
    let mut nodes: Vec<DocNode> = Vec::new();
    let mut folders: BTreeMap<&str, Vec<&FileInfo>> = BTreeMap::new();

    for &file in files {
        let remaining = &file.route[depth..];
        match remaining.len() {
            0 => {}
            1 => match file.parsed.kind {
                FileKind::Page => nodes.push(DocNode::Page(page_node(file))),
                FileKind::Button => nodes.push(DocNode::Button(button_node(file))),
                FileKind::DropdownSettings | FileKind::GroupSettings => {}
            },
            _ => folders.entry(&remaining[0]).or_default().push(file),
        }
    }

    for (segment, folder_files) in folders {
        let folder_path = if current_path.is_empty() {
            segment.to_owned()
        } else {
            format!("{current_path}/{segment}")
        };
        let folder_settings = settings.get(&folder_path);
        let children = build_level(&folder_files, depth + 1, &folder_path, settings, version_path);
        // Folder ids come from the full path so the same folder name under two
        // versions stays distinct.
        let id = node_id(&format!("{version_path}/{folder_path}"));

        nodes.push(match group_name(segment) {
            Some(name) => DocNode::Group(group_node(id, folder_path, name, children, folder_settings)),
            None => {
                DocNode::Dropdown(dropdown_node(id, folder_path, segment, children, folder_settings))
            }
        });
    }

    sort_nodes(&mut nodes);
    nodes
}

/// Sort a sibling list ascending by `order`, ties broken by title.
fn sort_nodes(nodes: &mut [DocNode]) {
    nodes.sort_by(|a, b| {
        a.order()
            .cmp(&b.order())
            .then_with(|| a.title().cmp(b.title()))
    });
}

/// Extract the group name from a `(group-NAME)` folder segment.
fn group_name(segment: &str) -> Option<&str> {
    segment.strip_prefix("(group-")?.strip_suffix(')')
}

fn page_node(file: &FileInfo) -> PageNode {
    let meta = &file.parsed.meta;
    let file_name = file.route.last().map(String::as_str).unwrap_or_default();
    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
    let default_title = if stem.is_empty() { "Untitled" } else { stem };

    PageNode {
        id: node_id(&file.path),
        title: meta
            .title
            .clone()
            .unwrap_or_else(|| default_title.to_owned()),
        order: meta.order.unwrap_or(0),
        icon: meta.icon.clone(),
        hidden: meta.hidden.unwrap_or(false),
        path: file
            .path
            .strip_suffix(".md")
            .unwrap_or(&file.path)
            .to_owned(),
        file_path: file.path.clone(),
        // Explicit frontmatter language wins over the path-derived one.
        language: meta.lang.clone().or_else(|| file.language.clone()),
        tags: meta.tags.clone(),
        content: file.parsed.body.clone().unwrap_or_default(),
        searchable: meta.searchable.unwrap_or(true),
    }
}

fn button_node(file: &FileInfo) -> ButtonNode {
    let meta = &file.parsed.meta;
    let file_name = file.route.last().map(String::as_str).unwrap_or_default();
    let stem = file_name
        .strip_suffix(".button.md")
        .or_else(|| file_name.strip_suffix(".button"))
        .unwrap_or(file_name);
    let default_title = if stem.is_empty() { "Button" } else { stem };

    let action = match meta.variant.unwrap_or_default() {
        ButtonVariant::Link => ButtonAction::Link {
            url: meta.url.clone(),
            target: meta.target.clone().unwrap_or_else(|| "_blank".to_owned()),
            style: meta.style.clone(),
        },
        ButtonVariant::Page => ButtonAction::Page {
            page_path: meta.page_path.clone(),
            file_path: file.path.clone(),
        },
    };

    ButtonNode {
        id: node_id(&file.path),
        title: meta
            .title
            .clone()
            .unwrap_or_else(|| default_title.to_owned()),
        order: meta.order.unwrap_or(0),
        icon: meta.icon.clone(),
        hidden: meta.hidden.unwrap_or(false),
        searchable: meta.searchable.unwrap_or(true),
        action,
    }
}

fn dropdown_node(
    id: String,
    path: String,
    segment: &str,
    children: Vec<DocNode>,
    settings: Option<&FrontMatter>,
) -> DropdownNode {
    DropdownNode {
        id,
        title: settings
            .and_then(|s| s.title.clone())
            .unwrap_or_else(|| segment.to_owned()),
        order: settings.and_then(|s| s.order).unwrap_or(0),
        icon: settings.and_then(|s| s.icon.clone()),
        hidden: settings.and_then(|s| s.hidden).unwrap_or(false),
        path,
        mode: settings.and_then(|s| s.dropdown).unwrap_or_default(),
        searchable: settings.and_then(|s| s.searchable),
        children,
    }
}

fn group_node(
    id: String,
    path: String,
    name: &str,
    children: Vec<DocNode>,
    settings: Option<&FrontMatter>,
) -> GroupNode {
    GroupNode {
        id,
        title: settings
            .and_then(|s| s.title.clone())
            .unwrap_or_else(|| name.to_owned()),
        order: settings.and_then(|s| s.order).unwrap_or(0),
        icon: settings.and_then(|s| s.icon.clone()),
        hidden: settings.and_then(|s| s.hidden).unwrap_or(false),
        path,
        description: settings.and_then(|s| s.description.clone()),
        children,
    }
}

#[cfg(test)]
mod tests {
    use doctree_frontmatter::DropdownMode;
    use pretty_assertions::assert_eq;

    use super::*;

    fn files(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(p, c)| ((*p).to_owned(), (*c).to_owned()))
            .collect()
    }

    fn page<'a>(node: &'a DocNode) -> &'a PageNode {
        match node {
            DocNode::Page(p) => p,
            other => panic!("expected page, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_builds_empty_tree() {
        assert_eq!(build_tree(&BTreeMap::new()), Vec::new());
    }

    #[test]
    fn test_two_versions_ordered_descending() {
        let tree = build_tree(&files(&[
            ("docs/1.2.0/intro.md", "---\ntitle: Intro\n---\nHello"),
            ("docs/1.0.0/intro.md", "---\ntitle: Intro\n---\nOld"),
        ]));

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].version, "1.2.0");
        assert_eq!(tree[1].version, "1.0.0");
        assert_eq!(tree[0].path, "docs/1.2.0");
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(page(&tree[0].children[0]).title, "Intro");
        assert_eq!(page(&tree[0].children[0]).content, "Hello");
    }

    #[test]
    fn test_version_fallback_to_first_segment() {
        let tree = build_tree(&files(&[("guides/setup.md", "# Setup")]));

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].version, "guides");
        assert_eq!(tree[0].path, "guides");
        assert_eq!(page(&tree[0].children[0]).title, "setup");
    }

    #[test]
    fn test_single_segment_file_is_dropped() {
        let tree = build_tree(&files(&[("orphan.md", "# Orphan")]));
        assert_eq!(tree, Vec::new());
    }

    #[test]
    fn test_group_folder_yields_group_node() {
        let tree = build_tree(&files(&[(
            "docs/1.0.0/(group-api)/auth.md",
            "---\ntitle: Auth\n---\nBody",
        )]));

        let DocNode::Group(group) = &tree[0].children[0] else {
            panic!("expected group");
        };
        assert_eq!(group.title, "api");
        assert_eq!(group.path, "(group-api)");
        assert_eq!(group.children.len(), 1);
        assert_eq!(page(&group.children[0]).title, "Auth");
    }

    #[test]
    fn test_plain_folder_yields_dropdown() {
        let tree = build_tree(&files(&[("docs/1.0.0/api/auth.md", "Body")]));

        let DocNode::Dropdown(dropdown) = &tree[0].children[0] else {
            panic!("expected dropdown");
        };
        assert_eq!(dropdown.title, "api");
        assert_eq!(dropdown.mode, DropdownMode::Collapsible);
        assert_eq!(dropdown.children.len(), 1);
    }

    #[test]
    fn test_dropdown_settings_apply_and_are_excluded() {
        let tree = build_tree(&files(&[
            ("docs/1.0.0/api/auth.md", "Body"),
            (
                "docs/1.0.0/api/dropdown-settings.md",
                "---\ntitle: API Reference\norder: 5\ndropdown: open\nsearchable: false\n---\n",
            ),
        ]));

        let DocNode::Dropdown(dropdown) = &tree[0].children[0] else {
            panic!("expected dropdown");
        };
        assert_eq!(dropdown.title, "API Reference");
        assert_eq!(dropdown.order, 5);
        assert_eq!(dropdown.mode, DropdownMode::Open);
        assert_eq!(dropdown.searchable, Some(false));
        // The settings file itself is not a child.
        assert_eq!(dropdown.children.len(), 1);
        assert_eq!(page(&dropdown.children[0]).title, "auth");
    }

    #[test]
    fn test_group_settings_apply() {
        let tree = build_tree(&files(&[
            ("docs/1.0.0/(group-api)/auth.md", "Body"),
            (
                "docs/1.0.0/(group-api)/group-settings.md",
                "---\ntitle: API\ndescription: Service endpoints\n---\n",
            ),
        ]));

        let DocNode::Group(group) = &tree[0].children[0] else {
            panic!("expected group");
        };
        assert_eq!(group.title, "API");
        assert_eq!(group.description.as_deref(), Some("Service endpoints"));
    }

    #[test]
    fn test_settings_key_strips_language_folders() {
        // Settings under a language folder apply to the language-less folder.
        let tree = build_tree(&files(&[
            ("docs/1.0.0/en/api/auth.md", "Body"),
            (
                "docs/1.0.0/en/api/dropdown-settings.md",
                "---\ntitle: API (EN)\n---\n",
            ),
        ]));

        let DocNode::Dropdown(dropdown) = &tree[0].children[0] else {
            panic!("expected dropdown");
        };
        assert_eq!(dropdown.title, "API (EN)");
        assert_eq!(dropdown.path, "api");
    }

    #[test]
    fn test_language_folder_is_not_a_node() {
        let tree = build_tree(&files(&[("docs/1.0.0/en/intro.md", "Body")]));

        // `en` is stripped; the page is a direct child of the version.
        assert_eq!(tree[0].children.len(), 1);
        let p = page(&tree[0].children[0]);
        assert_eq!(p.language.as_deref(), Some("en"));
        assert_eq!(p.file_path, "docs/1.0.0/en/intro.md");
    }

    #[test]
    fn test_language_folder_with_nested_folders() {
        let tree = build_tree(&files(&[
            ("docs/1.0.0/en/api/auth.md", "Body"),
            ("docs/1.0.0/ru/api/auth.md", "Body"),
        ]));

        // One dropdown "api" holding both language variants.
        assert_eq!(tree[0].children.len(), 1);
        let DocNode::Dropdown(dropdown) = &tree[0].children[0] else {
            panic!("expected dropdown");
        };
        assert_eq!(dropdown.children.len(), 2);
        let langs: Vec<_> = dropdown
            .children
            .iter()
            .map(|n| page(n).language.clone())
            .collect();
        assert!(langs.contains(&Some("en".to_owned())));
        assert!(langs.contains(&Some("ru".to_owned())));
    }

    #[test]
    fn test_explicit_lang_overrides_path_language() {
        let tree = build_tree(&files(&[(
            "docs/1.0.0/en/intro.md",
            "---\nlang: ru\n---\nBody",
        )]));

        assert_eq!(page(&tree[0].children[0]).language.as_deref(), Some("ru"));
    }

    #[test]
    fn test_sibling_sort_by_order_then_title() {
        let tree = build_tree(&files(&[
            ("docs/1.0.0/zebra.md", "---\norder: 1\n---\n"),
            ("docs/1.0.0/alpha.md", "---\norder: 2\n---\n"),
            ("docs/1.0.0/beta.md", "---\norder: 1\n---\n"),
        ]));

        let titles: Vec<_> = tree[0].children.iter().map(DocNode::title).collect();
        assert_eq!(titles, vec!["beta", "zebra", "alpha"]);
    }

    #[test]
    fn test_nested_siblings_are_sorted() {
        let tree = build_tree(&files(&[
            ("docs/1.0.0/api/b.md", "---\norder: 0\n---\n"),
            ("docs/1.0.0/api/a.md", "---\norder: 0\n---\n"),
            ("docs/1.0.0/api/first.md", "---\norder: -1\n---\n"),
        ]));

        let DocNode::Dropdown(dropdown) = &tree[0].children[0] else {
            panic!("expected dropdown");
        };
        let titles: Vec<_> = dropdown.children.iter().map(DocNode::title).collect();
        assert_eq!(titles, vec!["first", "a", "b"]);
    }

    #[test]
    fn test_link_button_defaults() {
        let tree = build_tree(&files(&[(
            "docs/1.0.0/github.button.md",
            "---\nurl: https://github.com/example\n---\n",
        )]));

        let DocNode::Button(button) = &tree[0].children[0] else {
            panic!("expected button");
        };
        assert_eq!(button.title, "github");
        assert!(button.searchable);
        assert_eq!(
            button.action,
            ButtonAction::Link {
                url: Some("https://github.com/example".to_owned()),
                target: "_blank".to_owned(),
                style: None,
            }
        );
    }

    #[test]
    fn test_page_button_carries_target_path() {
        let tree = build_tree(&files(&[(
            "docs/1.0.0/see-intro.button.md",
            "---\nvariant: page\npagePath: docs/1.0.0/intro\nsearchable: false\n---\n",
        )]));

        let DocNode::Button(button) = &tree[0].children[0] else {
            panic!("expected button");
        };
        assert!(!button.searchable);
        assert_eq!(
            button.action,
            ButtonAction::Page {
                page_path: Some("docs/1.0.0/intro".to_owned()),
                file_path: "docs/1.0.0/see-intro.button.md".to_owned(),
            }
        );
    }

    #[test]
    fn test_folder_ids_distinct_across_versions() {
        let tree = build_tree(&files(&[
            ("docs/1.0.0/api/a.md", ""),
            ("docs/2.0.0/api/a.md", ""),
        ]));

        let ids: Vec<_> = tree
            .iter()
            .map(|v| v.children[0].id().to_owned())
            .collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_malformed_frontmatter_degrades_to_defaults() {
        let tree = build_tree(&files(&[(
            "docs/1.0.0/broken.md",
            "---\ntitle: [unclosed\n---\nBody",
        )]));

        let p = page(&tree[0].children[0]);
        assert_eq!(p.title, "broken");
        assert_eq!(p.content, "Body");
    }

    #[test]
    fn test_deterministic_rebuild() {
        let input = files(&[
            ("docs/1.0.0/en/api/auth.md", "---\norder: 2\n---\nA"),
            ("docs/1.0.0/(group-core)/b.md", "B"),
            ("docs/1.2.0/intro.md", "---\ntitle: Intro\n---\nC"),
            ("docs/1.0.0/api/dropdown-settings.md", "---\ntitle: API\n---\n"),
        ]);

        let first = serde_json::to_string(&build_tree(&input)).unwrap();
        let second = serde_json::to_string(&build_tree(&input)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_version_segment_with_suffix() {
        let tree = build_tree(&files(&[("docs/1.0.0-beta/intro.md", "Body")]));

        assert_eq!(tree[0].version, "1.0.0-beta");
        assert_eq!(tree[0].path, "docs/1.0.0-beta");
    }
}
