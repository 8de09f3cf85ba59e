//! User notification capability
//!
//! Abstracts the platform toast/alert split behind a single interface; the
//! core only ever calls the trait. Presentation supplies its own
//! implementation per target platform.

use tracing::info;

/// One short user-facing message per call
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Notifier that routes messages into the log stream
///
/// Used by the CLI and anywhere no platform toast is available.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!(target: "givtrack::notify", "{}", message);
    }
}
