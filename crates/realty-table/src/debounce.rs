// Debounced search input

use std::time::Duration;

use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::trace;

/// Delay between the last keystroke and the search being applied
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Emits the latest input once no new input has arrived for `delay`.
///
/// Each call to `input` cancels the pending timer. Must be used inside a
/// tokio runtime.
pub struct SearchDebouncer {
    delay: Duration,
    tx: UnboundedSender<String>,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> (Self, UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            tx,
            pending: None,
        };
        (debouncer, rx)
    }

    pub fn input(&mut self, text: impl Into<String>) {
        self.cancel();

        let text = text.into();
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!(search = %text, "Debounced search settled");
            let _ = tx.send(text);
        }));
    }

    /// Drop the pending input, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
