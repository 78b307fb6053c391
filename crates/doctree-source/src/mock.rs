//! Mock source implementation for testing.
//!
//! Provides [`MockSource`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::sync::{RwLock, mpsc};

use crate::event::{SourceEvent, SourceEventKind, SourceEventReceiver, WatchHandle};
use crate::source::{Source, SourceError};

/// Mock source for testing.
///
/// Stores file contents in memory. Use the builder methods to configure the
/// mock with test data, and the `emit_*` methods to simulate changes after
/// `watch()` has been called.
///
/// # Example
///
/// ```ignore
/// use doctree_source::{MockSource, Source};
///
/// let source = MockSource::new()
///     .with_file("docs/1.0.0/intro.md", "---\ntitle: Intro\n---\nHello");
///
/// let files = source.scan().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    files: RwLock<BTreeMap<String, String>>,
    event_sender: RwLock<Option<mpsc::Sender<SourceEvent>>>,
}

impl MockSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given path and content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.write().unwrap().insert(path.into(), content.into());
        self
    }

    /// Replace a file's content after construction.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_file(&self, path: impl Into<String>, content: impl Into<String>) {
        self.files.write().unwrap().insert(path.into(), content.into());
    }

    /// Remove a file after construction.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn remove_file(&self, path: &str) {
        self.files.write().unwrap().remove(path);
    }

    /// Emit a source event.
    ///
    /// Only works if `watch()` has been called first.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn emit(&self, event: SourceEvent) {
        if let Some(sender) = self.event_sender.read().unwrap().as_ref() {
            let _ = sender.send(event);
        }
    }

    /// Emit a Created event.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn emit_created(&self, path: impl Into<String>) {
        self.emit(SourceEvent {
            path: path.into(),
            kind: SourceEventKind::Created,
        });
    }

    /// Emit a Modified event.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn emit_modified(&self, path: impl Into<String>) {
        self.emit(SourceEvent {
            path: path.into(),
            kind: SourceEventKind::Modified,
        });
    }

    /// Emit a Removed event.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn emit_removed(&self, path: impl Into<String>) {
        self.emit(SourceEvent {
            path: path.into(),
            kind: SourceEventKind::Removed,
        });
    }
}

impl Source for MockSource {
    fn scan(&self) -> Result<BTreeMap<String, String>, SourceError> {
        Ok(self.files.read().unwrap().clone())
    }

    fn watch(&self) -> Result<(SourceEventReceiver, WatchHandle), SourceError> {
        let (tx, rx) = mpsc::channel();
        *self.event_sender.write().unwrap() = Some(tx);
        // No cleanup needed for the in-memory backend.
        Ok((SourceEventReceiver::new(rx), WatchHandle::no_op()))
    }
}
