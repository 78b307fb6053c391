//! Documentation tree node types.
//!
//! The tree is a tagged union over four node kinds sharing a common header
//! (id, title, order, icon, hidden). Container kinds (dropdown, group) carry
//! ordered children; versions form the roots of the forest.
//!
//! All types serialize with a `type` discriminant field so a rendering layer
//! can dispatch on node kind without downcasting.

use serde::{Deserialize, Serialize};

pub use doctree_frontmatter::DropdownMode;

/// A leaf content page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageNode {
    /// Path-derived slug, unique while input paths are unique.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Sibling sort order (ascending).
    pub order: i64,
    /// Icon identifier for the UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Excluded from rendering and search, including descendants.
    #[serde(default)]
    pub hidden: bool,
    /// Source path with the `.md` extension removed.
    pub path: String,
    /// Original source path as scanned.
    pub file_path: String,
    /// Page language; `None` means common to all languages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Free-form tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Markdown body (frontmatter removed).
    pub content: String,
    /// Whether the page participates in the search index.
    pub searchable: bool,
}

/// Behavior of a [`ButtonNode`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum ButtonAction {
    /// External or internal link.
    Link {
        /// Link target URL.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        /// Anchor target (default `_blank`).
        target: String,
        /// Visual style hint for the UI.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<String>,
    },
    /// Pointer to another page, resolved against the built tree.
    Page {
        /// Target page path (a [`PageNode::path`] value).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page_path: Option<String>,
        /// Source path of the button file itself.
        file_path: String,
    },
}

/// A non-content navigation node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ButtonNode {
    /// Path-derived slug.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Sibling sort order (ascending).
    pub order: i64,
    /// Icon identifier for the UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Excluded from rendering.
    #[serde(default)]
    pub hidden: bool,
    /// Whether a page-variant target stays searchable. `false` blocks the
    /// target page from the search index.
    pub searchable: bool,
    /// Link or page-target behavior.
    #[serde(flatten)]
    pub action: ButtonAction,
}

/// A collapsible navigational folder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropdownNode {
    /// Path-derived slug.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Sibling sort order (ascending).
    pub order: i64,
    /// Icon identifier for the UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Excluded from rendering and search, including descendants.
    #[serde(default)]
    pub hidden: bool,
    /// Version-relative, language-stripped folder path.
    pub path: String,
    /// Display mode.
    pub mode: DropdownMode,
    /// Searchable override from `dropdown-settings.md`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub searchable: Option<bool>,
    /// Ordered children.
    pub children: Vec<DocNode>,
}

/// A non-interactive visual section label folder (`(group-NAME)`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupNode {
    /// Path-derived slug.
    pub id: String,
    /// Display title (the group marker name, absent an override).
    pub title: String,
    /// Sibling sort order (ascending).
    pub order: i64,
    /// Icon identifier for the UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Excluded from rendering and search, including descendants.
    #[serde(default)]
    pub hidden: bool,
    /// Version-relative, language-stripped folder path.
    pub path: String,
    /// Description from `group-settings.md`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered children.
    pub children: Vec<DocNode>,
}

/// A documentation tree node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DocNode {
    /// Leaf content page.
    Page(PageNode),
    /// Link or page-target button.
    Button(ButtonNode),
    /// Collapsible folder.
    Dropdown(DropdownNode),
    /// Visual section label folder.
    Group(GroupNode),
}

impl DocNode {
    /// Path-derived slug of the node.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Page(n) => &n.id,
            Self::Button(n) => &n.id,
            Self::Dropdown(n) => &n.id,
            Self::Group(n) => &n.id,
        }
    }

    /// Display title of the node.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Page(n) => &n.title,
            Self::Button(n) => &n.title,
            Self::Dropdown(n) => &n.title,
            Self::Group(n) => &n.title,
        }
    }

    /// Sibling sort order of the node.
    #[must_use]
    pub fn order(&self) -> i64 {
        match self {
            Self::Page(n) => n.order,
            Self::Button(n) => n.order,
            Self::Dropdown(n) => n.order,
            Self::Group(n) => n.order,
        }
    }

    /// Whether the node is excluded from rendering and search.
    #[must_use]
    pub fn hidden(&self) -> bool {
        match self {
            Self::Page(n) => n.hidden,
            Self::Button(n) => n.hidden,
            Self::Dropdown(n) => n.hidden,
            Self::Group(n) => n.hidden,
        }
    }

    /// Children of a container node; `None` for leaves.
    #[must_use]
    pub fn children(&self) -> Option<&[DocNode]> {
        match self {
            Self::Dropdown(n) => Some(&n.children),
            Self::Group(n) => Some(&n.children),
            Self::Page(_) | Self::Button(_) => None,
        }
    }
}

/// Root of one version's subtree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VersionNode {
    /// Version key (e.g. `1.2.0`, or the fallback first path segment).
    pub version: String,
    /// Path prefix up to and including the version segment.
    pub path: String,
    /// Ordered top-level nodes of this version.
    pub children: Vec<DocNode>,
}

/// The full documentation tree: versions ordered newest first.
pub type DocsTree = Vec<VersionNode>;

/// Derive a node id from a path: ASCII non-alphanumerics become `-`, the rest
/// is lowercased. Collision-free while input paths are unique.
#[must_use]
pub fn node_id(path: &str) -> String {
    path.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}
