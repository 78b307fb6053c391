//! Versioned documentation navigation tree building.
//!
//! This crate provides:
//! - [`build_tree`]: pure construction of a [`DocsTree`] from a scanned
//!   `path -> markdown` map
//! - Language handling: [`collect_languages`] and [`filter_by_language`]
//! - Lookups: [`find_page`], [`find_page_by_id`], [`resolve_button`]
//!
//! # Quick Start
//!
//! ```
//! use std::collections::BTreeMap;
//! use doctree_tree::{build_tree, find_page};
//!
//! let mut files = BTreeMap::new();
//! files.insert(
//!     "docs/1.0.0/intro.md".to_owned(),
//!     "---\ntitle: Introduction\n---\nWelcome!".to_owned(),
//! );
//!
//! let tree = build_tree(&files);
//! assert_eq!(tree[0].version, "1.0.0");
//!
//! let page = find_page(&tree, "docs/1.0.0/intro").unwrap();
//! assert_eq!(page.title, "Introduction");
//! ```

pub(crate) mod builder;
pub(crate) mod language;
pub(crate) mod lookup;
pub(crate) mod node;
pub(crate) mod version;

pub use builder::build_tree;
pub use language::{LANGUAGE_CODES, collect_languages, filter_by_language, is_language_segment};
pub use lookup::{find_page, find_page_by_id, resolve_button};
pub use node::{
    ButtonAction, ButtonNode, DocNode, DocsTree, DropdownMode, DropdownNode, GroupNode, PageNode,
    VersionNode, node_id,
};
pub use version::{compare_versions, is_version_segment};
