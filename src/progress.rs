//! Progress-callback trait for per-document generation events.
//!
//! Inject an [`Arc<dyn GenerationProgressCallback>`] via
//! [`crate::config::GenerationConfigBuilder::progress_callback`] to receive
//! events as the batch processes each document. The CLI uses this to drive
//! its progress bar; [`crate::log::BuildLog`] carries the log messages.
//!
//! # Example
//!
//! ```rust
//! use docs2llms::{GenerationConfig, GenerationProgressCallback};
//! use std::path::Path;
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: AtomicUsize,
//! }
//!
//! impl GenerationProgressCallback for CountingCallback {
//!     fn on_document_complete(&self, path: &Path, _index: usize, total: usize, markdown_len: usize) {
//!         let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
//!         eprintln!("{done}/{total} {} ({markdown_len} bytes)", path.display());
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { completed: AtomicUsize::new(0) });
//!
//! let config = GenerationConfig::builder()
//!     .progress_callback(counter as Arc<dyn GenerationProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the batch as it processes each document.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
///
/// # Thread safety
///
/// With `concurrency > 1`, `on_document_start`, `on_document_complete` and
/// `on_document_error` may be called from different tasks at the same time.
pub trait GenerationProgressCallback: Send + Sync {
    /// Called once after discovery, before any document is read.
    fn on_generation_start(&self, total_documents: usize) {
        let _ = total_documents;
    }

    /// Called before a document is read.
    ///
    /// # Arguments
    /// * `path`  — the HTML source
    /// * `index` — 0-based position in discovery order
    /// * `total` — number of discovered documents
    fn on_document_start(&self, path: &Path, index: usize, total: usize) {
        let _ = (path, index, total);
    }

    /// Called when a document's Markdown has been written.
    fn on_document_complete(&self, path: &Path, index: usize, total: usize, markdown_len: usize) {
        let _ = (path, index, total, markdown_len);
    }

    /// Called when a document is skipped.
    fn on_document_error(&self, path: &Path, index: usize, total: usize, error: &str) {
        let _ = (path, index, total, error);
    }

    /// Called once after every document has been attempted, before the
    /// combined file is written.
    fn on_generation_complete(&self, total_documents: usize, success_count: usize) {
        let _ = (total_documents, success_count);
    }
}

/// A no-op implementation; the default when no callback is configured.
pub struct NoopProgressCallback;

impl GenerationProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::GenerationConfig`].
pub type ProgressCallback = Arc<dyn GenerationProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        started_total: AtomicUsize,
        completed_total: AtomicUsize,
    }

    impl GenerationProgressCallback for TrackingCallback {
        fn on_generation_start(&self, total_documents: usize) {
            self.started_total.store(total_documents, Ordering::SeqCst);
        }

        fn on_document_start(&self, _path: &Path, _index: usize, _total: usize) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_document_complete(&self, _path: &Path, _index: usize, _total: usize, _len: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_document_error(&self, _path: &Path, _index: usize, _total: usize, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_generation_complete(&self, _total: usize, success_count: usize) {
            self.completed_total.store(success_count, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        let p = Path::new("index.html");
        cb.on_generation_start(2);
        cb.on_document_start(p, 0, 2);
        cb.on_document_complete(p, 0, 2, 42);
        cb.on_document_error(p, 1, 2, "some error");
        cb.on_generation_complete(2, 1);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();
        let a = Path::new("a.html");
        let b = Path::new("b.html");

        tracker.on_generation_start(2);
        tracker.on_document_start(a, 0, 2);
        tracker.on_document_complete(a, 0, 2, 10);
        tracker.on_document_start(b, 1, 2);
        tracker.on_document_error(b, 1, 2, "write failed");
        tracker.on_generation_complete(2, 1);

        assert_eq!(tracker.started_total.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.completed_total.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_generation_start(10);
        cb.on_document_complete(Path::new("x.html"), 0, 10, 512);
    }
}
