//! Convention-driven documentation tree building and search.
//!
//! This crate ties the doctree pipeline together:
//! - [`Engine`]: scans a source, builds the versioned navigation tree and
//!   search index as one snapshot, and serves concurrent lookups and queries
//! - Re-exports of the tree, search, source and config types a consumer needs
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use doctree::{Engine, EngineConfig, FsSource};
//!
//! let source = Arc::new(FsSource::new(PathBuf::from("docs")));
//! let engine = Arc::new(Engine::new(source, EngineConfig::default()));
//!
//! // Rebuild on file changes until the handle is dropped.
//! let _watch = engine.watch()?;
//!
//! let state = engine.snapshot();
//! for version in state.tree() {
//!     println!("{} ({} entries)", version.version, version.children.len());
//! }
//!
//! for hit in engine.search("authentication", Some("en")) {
//!     println!("{} (score: {:.3})", hit.document.title, hit.score);
//! }
//! # Ok(())
//! # }
//! ```

pub(crate) mod engine;

pub use engine::{Engine, EngineConfig, EngineState};

pub use doctree_config::{Config, ConfigError};
pub use doctree_search::{SearchDocument, SearchError, SearchHit, SearchIndex};
pub use doctree_source::{
    FsSource, Source, SourceError, SourceEvent, SourceEventKind, WatchHandle,
};
pub use doctree_tree::{
    ButtonAction, ButtonNode, DocNode, DocsTree, DropdownMode, DropdownNode, GroupNode, PageNode,
    VersionNode, build_tree, collect_languages, filter_by_language, find_page, resolve_button,
};
