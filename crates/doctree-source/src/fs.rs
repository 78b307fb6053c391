//! Filesystem source implementation.
//!
//! Provides [`FsSource`] for scanning a directory tree of markdown files and
//! watching it for changes.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use glob::Pattern;
use notify::{RecursiveMode, Watcher};

use crate::debouncer::EventDebouncer;
use crate::event::{SourceEvent, SourceEventKind, SourceEventReceiver, WatchHandle};
use crate::source::{Source, SourceError, SourceErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Window for coalescing editor save bursts into one event.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(100);

/// Directories that never contain documentation.
const SKIPPED_DIRS: [&str; 6] = [
    "node_modules",
    "target",
    "dist",
    "build",
    "vendor",
    "__pycache__",
];

/// Filesystem source.
///
/// Scans a root directory recursively for markdown files and returns their
/// contents keyed by relative forward-slash path. Hidden and
/// underscore-prefixed entries are skipped, as are common build-output
/// directories.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use doctree_source::{FsSource, Source};
///
/// let source = FsSource::new(PathBuf::from("docs"));
/// let files = source.scan()?;
/// ```
pub struct FsSource {
    /// Root directory for documentation files.
    root: PathBuf,
    /// Patterns for file watching (e.g., "**/*.md").
    watch_patterns: Vec<Pattern>,
}

impl FsSource {
    /// Create a new filesystem source watching `**/*.md`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self::with_patterns(root, vec!["**/*.md".to_owned()])
    }

    /// Create a new filesystem source with custom watch patterns.
    ///
    /// # Panics
    ///
    /// Panics if any of the provided glob patterns are invalid.
    #[must_use]
    pub fn with_patterns(root: PathBuf, patterns: Vec<String>) -> Self {
        let watch_patterns = patterns
            .iter()
            .map(|p| Pattern::new(p).expect("invalid glob pattern"))
            .collect();

        Self {
            root,
            watch_patterns,
        }
    }

    /// Scan a directory recursively, accumulating file contents.
    fn scan_directory(
        &self,
        dir: &Path,
        prefix: &str,
        files: &mut BTreeMap<String, String>,
    ) -> Result<(), SourceError> {
        let entries =
            fs::read_dir(dir).map_err(|e| SourceError::io(e, Some(dir.to_path_buf())))?;

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || name.starts_with('_') {
                continue;
            }

            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            let path = entry.path();
            let rel = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            };

            if is_dir {
                if SKIPPED_DIRS.contains(&name.to_lowercase().as_str()) {
                    continue;
                }
                self.scan_directory(&path, &rel, files)?;
            } else if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("md")) {
                match fs::read_to_string(&path) {
                    Ok(content) => {
                        files.insert(rel, content);
                    }
                    Err(error) => {
                        // One unreadable file does not fail the scan.
                        tracing::warn!(path = %path.display(), %error, "skipping unreadable file");
                    }
                }
            }
        }

        Ok(())
    }
}

/// Convert a relative path to a forward-slash string.
fn normalize(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

impl Source for FsSource {
    fn scan(&self) -> Result<BTreeMap<String, String>, SourceError> {
        let mut files = BTreeMap::new();
        if !self.root.exists() {
            return Ok(files);
        }

        self.scan_directory(&self.root, "", &mut files)
            .map_err(|e| e.with_backend(BACKEND))?;
        Ok(files)
    }

    fn watch(&self) -> Result<(SourceEventReceiver, WatchHandle), SourceError> {
        let (event_tx, event_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel();

        let debouncer = std::sync::Arc::new(EventDebouncer::new(DEBOUNCE_WINDOW));

        let root = self.root.clone();
        let patterns = self.watch_patterns.clone();
        let debouncer_for_watcher = std::sync::Arc::clone(&debouncer);

        let mut watcher =
            notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
                if let Ok(event) = res {
                    let kind = match event.kind {
                        notify::EventKind::Create(_) => SourceEventKind::Created,
                        notify::EventKind::Modify(_) => SourceEventKind::Modified,
                        notify::EventKind::Remove(_) => SourceEventKind::Removed,
                        _ => return,
                    };

                    for path in event.paths {
                        let Ok(rel_path) = path.strip_prefix(&root) else {
                            continue;
                        };

                        let matches_pattern = patterns.is_empty()
                            || patterns.iter().any(|pattern| pattern.matches_path(rel_path));
                        if !matches_pattern {
                            continue;
                        }

                        debouncer_for_watcher.record(normalize(rel_path), kind);
                    }
                }
            })
            .map_err(|e| {
                SourceError::new(SourceErrorKind::Other)
                    .with_backend(BACKEND)
                    .with_source(e)
            })?;

        watcher
            .watch(&self.root, RecursiveMode::Recursive)
            .map_err(|e| {
                SourceError::new(SourceErrorKind::Unavailable)
                    .with_backend(BACKEND)
                    .with_path(&self.root)
                    .with_source(e)
            })?;

        // Keep the watcher alive for the lifetime of the drain thread.
        std::thread::spawn(move || {
            let _watcher_guard = watcher;

            loop {
                match shutdown_rx.recv_timeout(Duration::from_millis(50)) {
                    Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                    Err(mpsc::RecvTimeoutError::Timeout) => {}
                }

                for event in debouncer.drain_ready() {
                    let source_event = SourceEvent {
                        path: event.path,
                        kind: event.kind,
                    };
                    if event_tx.send(source_event).is_err() {
                        // Receiver dropped, exit thread.
                        return;
                    }
                }
            }
        });

        let handle = WatchHandle::new(shutdown_tx);
        Ok((SourceEventReceiver::new(event_rx), handle))
    }
}
