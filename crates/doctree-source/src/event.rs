//! Source event types for change notification.
//!
//! Provides types for subscribing to file changes through the
//! [`Source::watch`](crate::Source::watch) method.

use std::sync::mpsc;

/// Kind of source event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceEventKind {
    /// File was created.
    Created,
    /// File was modified.
    Modified,
    /// File was removed.
    Removed,
}

/// A source change event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceEvent {
    /// Relative forward-slash path (e.g. `docs/1.0.0/intro.md`).
    pub path: String,
    /// Kind of change.
    pub kind: SourceEventKind,
}

/// Receiver for source events.
///
/// Wraps a [`std::sync::mpsc::Receiver`] for synchronous event delivery.
/// Can be iterated with [`iter()`](Self::iter) or polled with
/// [`recv()`](Self::recv)/[`try_recv()`](Self::try_recv).
pub struct SourceEventReceiver {
    rx: mpsc::Receiver<SourceEvent>,
}

impl SourceEventReceiver {
    pub(crate) fn new(rx: mpsc::Receiver<SourceEvent>) -> Self {
        Self { rx }
    }

    /// Wait for the next event (blocking).
    ///
    /// Returns `None` when the sender is dropped.
    #[must_use]
    pub fn recv(&self) -> Option<SourceEvent> {
        self.rx.recv().ok()
    }

    /// Try to receive an event without blocking.
    ///
    /// Returns `None` if no event is available or the sender is dropped.
    #[must_use]
    pub fn try_recv(&self) -> Option<SourceEvent> {
        self.rx.try_recv().ok()
    }

    /// Returns an iterator over events.
    ///
    /// Blocks until an event is available. Stops when the sender is dropped.
    pub fn iter(&self) -> impl Iterator<Item = SourceEvent> + '_ {
        self.rx.iter()
    }

    /// Create a no-op receiver that never yields events.
    pub(crate) fn no_op() -> Self {
        let (_tx, rx) = mpsc::channel();
        Self { rx }
    }
}

/// Handle to stop watching for changes.
///
/// RAII: dropping the handle stops watching by dropping the internal channel
/// sender, which the watcher thread observes as a disconnect.
pub struct WatchHandle {
    _shutdown: Option<mpsc::Sender<()>>,
}

impl WatchHandle {
    pub(crate) fn new(shutdown: mpsc::Sender<()>) -> Self {
        Self {
            _shutdown: Some(shutdown),
        }
    }

    /// Stop watching immediately (consumes the handle).
    pub fn stop(mut self) {
        self._shutdown.take();
    }

    /// Create a no-op handle that does nothing on drop.
    pub(crate) fn no_op() -> Self {
        Self { _shutdown: None }
    }
}
