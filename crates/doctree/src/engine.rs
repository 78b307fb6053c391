//! Unified documentation engine.
//!
//! Provides [`Engine`] for building tree and search state from a [`Source`]
//! backend and serving consistent snapshots to concurrent readers.
//!
//! # Thread Safety
//!
//! `Engine` is designed for concurrent access:
//! - `snapshot()` returns `Arc<EngineState>` with minimal locking (just an
//!   Arc clone)
//! - `reload_if_needed()` uses double-checked locking so concurrent readers
//!   trigger at most one rebuild
//! - `invalidate()` is lock-free (atomic flag)
//!
//! # Fault Model
//!
//! Rebuilds never surface errors to readers. A failed scan, a panicking tree
//! build or a failed index build degrades to an empty tree / disabled search,
//! logged at warn level. The view layer renders that as "no documentation",
//! not an error state.

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

use doctree_config::Config;
use doctree_search::{SearchHit, SearchIndex};
use doctree_source::{FsSource, Source, SourceError, WatchHandle};
use doctree_tree::{
    ButtonNode, DocsTree, PageNode, build_tree, collect_languages, filter_by_language, find_page,
    find_page_by_id, resolve_button,
};

/// Configuration for [`Engine`].
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Maximum number of search results returned per query.
    pub search_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { search_limit: 50 }
    }
}

/// One consistent snapshot of all derived documentation state.
///
/// Snapshots are immutable; a rebuild replaces the whole snapshot rather than
/// mutating it in place, so readers holding an `Arc<EngineState>` never
/// observe partial updates.
pub struct EngineState {
    tree: DocsTree,
    languages: Vec<String>,
    index: Option<SearchIndex>,
}

impl EngineState {
    fn empty() -> Self {
        Self {
            tree: Vec::new(),
            languages: Vec::new(),
            index: None,
        }
    }

    /// The full documentation tree, versions ordered newest first.
    #[must_use]
    pub fn tree(&self) -> &DocsTree {
        &self.tree
    }

    /// Distinct page languages present in the tree, sorted.
    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }
}

/// Unified documentation tree building and search.
///
/// Scans a [`Source`] for markdown files, builds the versioned navigation
/// tree and the search index as one atomic snapshot, and serves lookups and
/// queries against it. Snapshots are rebuilt lazily after
/// [`invalidate`](Self::invalidate).
pub struct Engine {
    source: Arc<dyn Source>,
    /// Mutex for serializing rebuild operations.
    reload_lock: Mutex<()>,
    /// Current snapshot (atomically swappable).
    current_state: RwLock<Arc<EngineState>>,
    /// Snapshot validity flag.
    state_valid: AtomicBool,
    search_limit: usize,
}

impl Engine {
    /// Create a new engine over a source.
    #[must_use]
    pub fn new(source: Arc<dyn Source>, config: EngineConfig) -> Self {
        Self {
            source,
            reload_lock: Mutex::new(()),
            current_state: RwLock::new(Arc::new(EngineState::empty())),
            state_valid: AtomicBool::new(false),
            search_limit: config.search_limit,
        }
    }

    /// Create an engine from an application [`Config`], backed by the
    /// filesystem source it names.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let source = match &config.live_reload.watch_patterns {
            Some(patterns) => FsSource::with_patterns(
                config.docs_resolved.source_dir.clone(),
                patterns.clone(),
            ),
            None => FsSource::new(config.docs_resolved.source_dir.clone()),
        };
        Self::new(
            Arc::new(source),
            EngineConfig {
                search_limit: config.search.limit,
            },
        )
    }

    /// Get the current snapshot without checking validity.
    fn state(&self) -> Arc<EngineState> {
        self.current_state.read().unwrap().clone()
    }

    /// Get an up-to-date snapshot, rebuilding first if invalidated.
    ///
    /// Uses double-checked locking:
    /// 1. Fast path: return the current snapshot if still valid
    /// 2. Slow path: acquire `reload_lock`, recheck, then rebuild
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    #[must_use]
    pub fn snapshot(&self) -> Arc<EngineState> {
        if self.state_valid.load(Ordering::Acquire) {
            return self.state();
        }

        let _guard = self.reload_lock.lock().unwrap();

        if self.state_valid.load(Ordering::Acquire) {
            return self.state();
        }

        let state = Arc::new(self.load_from_source());
        *self.current_state.write().unwrap() = state.clone();
        self.state_valid.store(true, Ordering::Release);

        state
    }

    /// Mark the current snapshot stale.
    ///
    /// The next `snapshot()` call rebuilds; current readers continue using
    /// their existing `Arc<EngineState>`.
    pub fn invalidate(&self) {
        self.state_valid.store(false, Ordering::Release);
    }

    /// Find a page by its extension-less path.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    #[must_use]
    pub fn page(&self, path: &str) -> Option<PageNode> {
        find_page(self.snapshot().tree(), path).cloned()
    }

    /// Resolve a page-variant button to its target page.
    ///
    /// Returns `None` for link buttons and for targets absent from the tree.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    #[must_use]
    pub fn resolve_button(&self, button: &ButtonNode) -> Option<PageNode> {
        resolve_button(self.snapshot().tree(), button).cloned()
    }

    /// Run a search query, optionally scoped to one language view.
    ///
    /// Hits whose page is no longer resolvable in the current (possibly
    /// language-filtered) tree are silently dropped rather than surfaced as
    /// errors; likewise query failures degrade to an empty result list.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    #[must_use]
    pub fn search(&self, query: &str, language: Option<&str>) -> Vec<SearchHit> {
        let state = self.snapshot();
        let Some(index) = &state.index else {
            return Vec::new();
        };

        let hits = match index.search(query, self.search_limit) {
            Ok(hits) => hits,
            Err(error) => {
                tracing::warn!(%error, query, "search query failed");
                return Vec::new();
            }
        };

        let filtered;
        let view: &DocsTree = match language {
            Some(lang) => {
                filtered = filter_by_language(state.tree(), lang);
                &filtered
            }
            None => state.tree(),
        };

        hits.into_iter()
            .filter(|hit| find_page_by_id(view, &hit.document.id).is_some())
            .collect()
    }

    /// Start watching the source, invalidating the snapshot on every change.
    ///
    /// Returns the RAII handle; dropping it stops watching. The invalidation
    /// thread exits when the engine is dropped or watching stops.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the source cannot start watching.
    pub fn watch(self: &Arc<Self>) -> Result<WatchHandle, SourceError> {
        let (receiver, handle) = self.source.watch()?;

        let engine: Weak<Self> = Arc::downgrade(self);
        std::thread::spawn(move || {
            while let Some(event) = receiver.recv() {
                let Some(engine) = engine.upgrade() else {
                    return;
                };
                tracing::debug!(path = event.path, kind = ?event.kind, "source changed");
                engine.invalidate();
            }
        });

        Ok(handle)
    }

    /// Rebuild all derived state from the source, fail-soft.
    fn load_from_source(&self) -> EngineState {
        let files = match self.source.scan() {
            Ok(files) => files,
            Err(error) => {
                tracing::warn!(%error, "source scan failed, serving empty tree");
                BTreeMap::new()
            }
        };

        let tree = match std::panic::catch_unwind(AssertUnwindSafe(|| build_tree(&files))) {
            Ok(tree) => tree,
            Err(_) => {
                tracing::warn!("tree construction panicked, serving empty tree");
                Vec::new()
            }
        };

        let languages = collect_languages(&tree);
        let index = match SearchIndex::build(&tree) {
            Ok(index) => Some(index),
            Err(error) => {
                tracing::warn!(%error, "search index build failed, search disabled");
                None
            }
        };

        tracing::debug!(
            versions = tree.len(),
            languages = languages.len(),
            "documentation state rebuilt"
        );

        EngineState {
            tree,
            languages,
            index,
        }
    }
}
