//! Progress-callback trait for per-document batch events.
//!
//! Inject an [`Arc<dyn CleanProgressCallback>`] via
//! [`crate::config::CleanConfigBuilder::progress_callback`] to receive
//! real-time events as a batch processes each document.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a Tokio broadcast channel, a database record, or a
//! terminal progress bar, without the library knowing anything about how the
//! host application communicates. The trait is `Send + Sync` so it works
//! correctly when documents are processed concurrently.

use std::sync::Arc;

/// Called by the batch pipeline as it processes each document.
///
/// Implementations must be `Send + Sync` (documents in a batch are cleaned
/// concurrently). All methods have default no-op implementations so callers
/// only override what they care about.
///
/// # Thread safety
///
/// `on_file_start`, `on_file_complete`, and `on_file_error` may be called
/// concurrently from different tasks. Implementations must protect shared
/// mutable state with appropriate synchronisation primitives.
pub trait CleanProgressCallback: Send + Sync {
    /// Called once before any document is processed.
    fn on_run_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a document's pipeline begins.
    fn on_file_start(&self, path: &std::path::Path, total_files: usize) {
        let _ = (path, total_files);
    }

    /// Called when a document has been cleaned and written.
    ///
    /// `paragraphs` is the number of output lines, useful for progress
    /// displays that track output volume.
    fn on_file_complete(&self, path: &std::path::Path, total_files: usize, paragraphs: usize) {
        let _ = (path, total_files, paragraphs);
    }

    /// Called when a document fails (its error is final; nothing is retried).
    fn on_file_error(&self, path: &std::path::Path, total_files: usize, error: &str) {
        let _ = (path, total_files, error);
    }

    /// Called once after every document has been attempted.
    fn on_run_complete(&self, total_files: usize, success_count: usize) {
        let _ = (total_files, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl CleanProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::CleanConfig`].
pub type ProgressCallback = Arc<dyn CleanProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
    }

    impl CleanProgressCallback for TrackingCallback {
        fn on_file_start(&self, _path: &Path, _total: usize) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_complete(&self, _path: &Path, _total: usize, _paragraphs: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_error(&self, _path: &Path, _total: usize, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_run_start(3);
        cb.on_file_start(Path::new("a.txt"), 3);
        cb.on_file_complete(Path::new("a.txt"), 3, 42);
        cb.on_file_error(Path::new("b.txt"), 3, "some error");
        cb.on_run_complete(3, 2);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            starts: AtomicUsize::new(0),
            completes: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
        };

        tracker.on_file_start(Path::new("a.txt"), 2);
        tracker.on_file_complete(Path::new("a.txt"), 2, 10);
        tracker.on_file_start(Path::new("b.txt"), 2);
        tracker.on_file_error(Path::new("b.txt"), 2, "not UTF-8");

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn CleanProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_run_start(10);
        cb.on_file_start(Path::new("a.txt"), 10);
    }
}
