//! Event debouncing for source change notification.
//!
//! Coalesces bursts of raw watcher events into single events per path,
//! reducing rebuild churn when editors emit multiple events per save.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::event::SourceEventKind;

/// A debounced event, keyed by the relative path it was recorded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DebouncedEvent {
    pub path: String,
    pub kind: SourceEventKind,
}

/// Pending event waiting to be emitted.
struct PendingEvent {
    kind: SourceEventKind,
    deadline: Instant,
}

/// Thread-safe event debouncer.
///
/// Each recorded event resets the path's deadline; overlapping kinds are
/// coalesced pairwise (see [`coalesce`](Self::coalesce)).
pub(crate) struct EventDebouncer {
    pending: Mutex<HashMap<String, PendingEvent>>,
    debounce_duration: Duration,
}

impl EventDebouncer {
    pub fn new(debounce_duration: Duration) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            debounce_duration,
        }
    }

    /// Record an event.
    ///
    /// Thread-safe, can be called from file system watcher callbacks.
    pub fn record(&self, path: String, kind: SourceEventKind) {
        use std::collections::hash_map::Entry;

        let mut pending = self.pending.lock().unwrap();
        let deadline = Instant::now() + self.debounce_duration;

        match pending.entry(path) {
            Entry::Vacant(entry) => {
                entry.insert(PendingEvent { kind, deadline });
            }
            Entry::Occupied(mut entry) => {
                let existing_kind = entry.get().kind;
                if let Some(coalesced_kind) = Self::coalesce(existing_kind, kind) {
                    entry.get_mut().kind = coalesced_kind;
                    entry.get_mut().deadline = deadline;
                } else {
                    // Created + Removed within one window: file never existed
                    // as far as consumers are concerned.
                    entry.remove();
                }
            }
        }
    }

    /// Coalesce two event kinds; `None` discards the pending entry.
    #[allow(clippy::match_same_arms)]
    fn coalesce(existing: SourceEventKind, new: SourceEventKind) -> Option<SourceEventKind> {
        use SourceEventKind::{Created, Modified, Removed};

        match (existing, new) {
            (Created, Created) => Some(Created),
            (Created, Modified) => Some(Created),
            (Created, Removed) => None,

            (Modified, Created) => Some(Created),
            (Modified, Modified) => Some(Modified),
            (Modified, Removed) => Some(Removed),

            (Removed, Created) => Some(Modified),
            (Removed, Modified) => Some(Removed),
            (Removed, Removed) => Some(Removed),
        }
    }

    /// Drain events that have passed their debounce deadline.
    ///
    /// Thread-safe, called from the watcher drain thread.
    pub fn drain_ready(&self) -> Vec<DebouncedEvent> {
        let mut pending = self.pending.lock().unwrap();
        let now = Instant::now();

        let ready_paths: Vec<String> = pending
            .iter()
            .filter(|(_, event)| event.deadline <= now)
            .map(|(path, _)| path.clone())
            .collect();

        ready_paths
            .into_iter()
            .map(|path| {
                let event = pending.remove(&path).expect("path was just found");
                DebouncedEvent {
                    path,
                    kind: event.kind,
                }
            })
            .collect()
    }
}
