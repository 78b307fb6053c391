//! Full-text search over built documentation trees.
//!
//! This crate provides:
//! - [`extract_documents`]: projection of a tree's searchable pages into
//!   [`SearchDocument`]s, honoring hidden/searchable/blocking rules
//! - [`SearchIndex`]: an in-memory index over those documents with
//!   field-weighted ranking across title, content and path
//!
//! # Quick Start
//!
//! ```
//! use std::collections::BTreeMap;
//! use doctree_tree::build_tree;
//! use doctree_search::SearchIndex;
//!
//! # fn main() -> Result<(), doctree_search::SearchError> {
//! let mut files = BTreeMap::new();
//! files.insert(
//!     "docs/1.0.0/auth.md".to_owned(),
//!     "---\ntitle: Authentication\n---\nTokens and sessions.".to_owned(),
//! );
//!
//! let tree = build_tree(&files);
//! let index = SearchIndex::build(&tree)?;
//!
//! let hits = index.search("tokens", 10)?;
//! assert_eq!(hits[0].document.title, "Authentication");
//! # Ok(())
//! # }
//! ```

pub(crate) mod document;
pub(crate) mod index;

pub use document::{SearchDocument, extract_documents, flatten_markdown};
pub use index::{SearchError, SearchHit, SearchIndex};
