//! User-facing notifications (toasts)

use tracing::{error, info};

/// Sink for user-visible success and error messages
pub trait Notifier: Send + Sync {
    fn notify_error(&self, message: &str);

    fn notify_success(&self, message: &str);
}

/// Notifier that discards everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify_error(&self, _message: &str) {}

    fn notify_success(&self, _message: &str) {}
}

/// Notifier that writes messages to the tracing log
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_error(&self, message: &str) {
        error!(target: "realty_client::notify", "{}", message);
    }

    fn notify_success(&self, message: &str) {
        info!(target: "realty_client::notify", "{}", message);
    }
}
