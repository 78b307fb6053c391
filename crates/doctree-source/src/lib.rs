//! Source abstraction for the doctree documentation engine.
//!
//! This crate provides a [`Source`] trait for abstracting documentation file
//! scanning and change notification from the underlying backend. This
//! enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Backend flexibility** (filesystem today, anything that can produce a
//!   file map tomorrow)
//! - **Clean separation** between tree-building logic and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Source`] trait with `scan()` and `watch()` methods
//! - [`FsSource`] implementation for filesystem backends with debounced
//!   change notification
//! - [`MockSource`] for testing (behind the `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use doctree_source::{FsSource, Source};
//!
//! let source = FsSource::new(PathBuf::from("docs"));
//! let files = source.scan()?;
//! for (path, content) in &files {
//!     println!("{path}: {} bytes", content.len());
//! }
//! ```

mod debouncer;
mod event;
mod fs;
#[cfg(feature = "mock")]
mod mock;
mod source;

pub use event::{SourceEvent, SourceEventKind, SourceEventReceiver, WatchHandle};
pub use fs::FsSource;
#[cfg(feature = "mock")]
pub use mock::MockSource;
pub use source::{Source, SourceError, SourceErrorKind};
