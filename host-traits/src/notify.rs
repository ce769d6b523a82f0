//! User notification boundary trait.
//!
//! Used exactly once in the core: when the native playback control cannot be
//! created at construction time, the user gets a single modal notification.
//! Runtime faults are never surfaced this way; they tear the component down
//! silently.

use tracing::error;

/// Host-side user notification sink.
pub trait UserNotifier: Send + Sync {
    /// Show a user-facing error notification.
    fn notify_error(&self, title: &str, message: &str);
}

/// Notifier that forwards to the tracing pipeline, for tests and headless
/// hosts without a notification UI.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl UserNotifier for LogNotifier {
    fn notify_error(&self, title: &str, message: &str) {
        error!(title, "{message}");
    }
}
